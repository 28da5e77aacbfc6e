//! # Point-in-Polygon Primitive
//!
//! Ray-casting PIP test over integer coordinates (spec §4.2). The ring is
//! stored unclosed as two parallel `i32` slices; the edge from the last
//! point back to the first is implicit. All intermediate products run in
//! `i64` since the scaled coordinates (up to `180e7`) overflow `i32` once
//! multiplied together.

/// Returns true if `(x, y)` lies inside or on the boundary of the polygon
/// described by `xs`/`ys`. `xs.len() == ys.len() >= 3` is required;
/// callers are expected to have validated ring size at load time (spec
/// §7: `N < 3` is a data-corruption class, not a runtime error here).
pub fn inside_polygon(x: i32, y: i32, xs: &[i32], ys: &[i32]) -> bool {
    debug_assert_eq!(xs.len(), ys.len());
    let n = xs.len();
    debug_assert!(n >= 3);

    let mut inside = false;
    let (mut x1, mut y1) = (xs[n - 1], ys[n - 1]);
    let mut y_gt_y1 = y > y1;

    for i in 0..n {
        let (x2, y2) = (xs[i], ys[i]);
        let y_gt_y2 = y > y2;

        if y_gt_y1 != y_gt_y2 {
            if i64::from(x1.max(x2)) < i64::from(x) {
                // both endpoints strictly left of x: no crossing
            } else if i64::from(x1.min(x2)) >= i64::from(x) {
                inside = !inside;
            } else {
                let s1 = i64::from(y2 - y) * i64::from(x2 - x1);
                let s2 = i64::from(y2 - y1) * i64::from(x2 - x);
                if y_gt_y1 {
                    if s1 <= s2 {
                        inside = !inside;
                    }
                } else if s1 >= s2 {
                    inside = !inside;
                }
            }
        }

        x1 = x2;
        y1 = y2;
        y_gt_y1 = y_gt_y2;
    }

    inside
}

#[cfg(test)]
mod tests {
    use super::*;

    // unit square [0,10] x [0,10]
    const SQUARE_X: [i32; 4] = [0, 10, 10, 0];
    const SQUARE_Y: [i32; 4] = [0, 0, 10, 10];

    #[test]
    fn inside_center() {
        assert!(inside_polygon(5, 5, &SQUARE_X, &SQUARE_Y));
    }

    #[test]
    fn outside_far() {
        assert!(!inside_polygon(100, 100, &SQUARE_X, &SQUARE_Y));
    }

    #[test]
    fn on_vertex_counts_as_inside() {
        assert!(inside_polygon(0, 0, &SQUARE_X, &SQUARE_Y));
        assert!(inside_polygon(10, 10, &SQUARE_X, &SQUARE_Y));
    }

    #[test]
    fn on_edge_counts_as_inside() {
        assert!(inside_polygon(5, 0, &SQUARE_X, &SQUARE_Y));
        assert!(inside_polygon(0, 5, &SQUARE_X, &SQUARE_Y));
    }

    #[test]
    fn rotational_invariance() {
        let points = [(5, 5), (0, 0), (10, 10), (-1, -1), (20, 5), (5, 0)];
        let n = SQUARE_X.len();
        for shift in 0..n {
            let xs: Vec<i32> = (0..n).map(|i| SQUARE_X[(i + shift) % n]).collect();
            let ys: Vec<i32> = (0..n).map(|i| SQUARE_Y[(i + shift) % n]).collect();
            for &(x, y) in &points {
                assert_eq!(
                    inside_polygon(x, y, &SQUARE_X, &SQUARE_Y),
                    inside_polygon(x, y, &xs, &ys),
                    "mismatch at shift={shift}, point=({x},{y})"
                );
            }
        }
    }

    #[test]
    fn concave_polygon() {
        // a "C" shape: outer box with a notch cut from the right side
        let xs = [0, 10, 10, 4, 4, 10, 10, 0];
        let ys = [0, 0, 4, 4, 6, 6, 10, 10];
        assert!(inside_polygon(2, 5, &xs, &ys)); // inside the notch column, left part
        assert!(!inside_polygon(7, 5, &xs, &ys)); // inside the notch itself
        assert!(inside_polygon(2, 2, &xs, &ys));
    }
}
