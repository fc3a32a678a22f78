use super::types::{EdgeClass, EdgeMask};

/// Single non-recursive pass dropping sparsely supported edge pixels.
///
/// Every interior edge pixel whose 3x3 neighbourhood (itself included)
/// holds fewer than `min_neighbors` edge pixels becomes background.
/// Neighbour counts are taken from the input, so removals in this pass do
/// not influence each other. Border pixels are never touched.
pub fn remove_isolated_edges(mask: &EdgeMask, min_neighbors: usize) -> EdgeMask {
    let (width, height) = mask.dimensions();
    let mut classes = mask.classes().to_vec();
    if width < 3 || height < 3 {
        return EdgeMask::from_parts(width, height, classes);
    }

    for y in 1..height - 1 {
        for x in 1..width - 1 {
            if !mask.get(x, y).is_edge() {
                continue;
            }

            let mut count = 0;
            for ny in y - 1..=y + 1 {
                for nx in x - 1..=x + 1 {
                    if mask.get(nx, ny).is_edge() {
                        count += 1;
                    }
                }
            }

            if count < min_neighbors {
                classes[y as usize * width as usize + x as usize] = EdgeClass::Background;
            }
        }
    }

    EdgeMask::from_parts(width, height, classes)
}
