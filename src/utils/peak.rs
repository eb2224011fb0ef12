use serde::{Deserialize, Serialize};

use crate::float::Float;

/// How the integer autocorrelation peak is refined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeakCorrection {
    Quadratic,
    None,
}

struct Point<T: Float> {
    x: T,
    y: T,
}

/// Index of the first sample at which `arr` stops strictly decreasing.
///
/// For an autocorrelation this walks off the zero-lag peak, so a later
/// maximum search cannot lock onto lag zero.
pub fn skip_descending<T: Float>(arr: &[T]) -> usize {
    arr.windows(2).take_while(|win| win[0] > win[1]).count()
}

/// The first index at or after `start` holding the maximum of `arr[start..]`.
pub fn find_max_peak<T: Float>(arr: &[T], start: usize) -> Option<(usize, T)> {
    arr.iter()
        .enumerate()
        .skip(start)
        .fold(None, |best: Option<(usize, T)>, (i, &val)| match best {
            Some((_, best_val)) if best_val >= val => best,
            _ => Some((i, val)),
        })
}

/// Refine `peak` to sub-sample precision. The integer peak is returned
/// unchanged when it sits on either edge of `data` or when the parabola
/// through its neighbours has no curvature.
pub fn correct_peak<T: Float>(peak: (usize, T), data: &[T], correction: PeakCorrection) -> (T, T) {
    let idx = peak.0;
    let unrefined = (T::from_usize(idx).unwrap(), peak.1);

    match correction {
        PeakCorrection::Quadratic => {
            if idx == 0 || idx + 1 >= data.len() {
                return unrefined;
            }
            quadratic_interpolation(
                Point {
                    x: T::from_usize(idx - 1).unwrap(),
                    y: data[idx - 1],
                },
                Point {
                    x: T::from_usize(idx).unwrap(),
                    y: data[idx],
                },
                Point {
                    x: T::from_usize(idx + 1).unwrap(),
                    y: data[idx + 1],
                },
            )
            .map_or(unrefined, |point| (point.x, point.y))
        }
        PeakCorrection::None => unrefined,
    }
}

/// Vertex of the parabola through three equally spaced points.
///
/// With `a = (l + r - 2c) / 2` and `b = (r - l) / 2` the vertex lies at
/// `c.x - b / (2a)`. Returns `None` when `a == 0`.
fn quadratic_interpolation<T: Float>(
    left: Point<T>,
    center: Point<T>,
    right: Point<T>,
) -> Option<Point<T>> {
    let two = T::from_f64(2.0).unwrap();
    let a = (left.y + right.y - two * center.y) / two;
    let b = (right.y - left.y) / two;
    if a == T::zero() {
        return None;
    }
    let shift = -b / (two * a);
    let x = center.x + shift;
    let y = center.y - b * b / (T::from_f64(4.0).unwrap() * a);
    Some(Point { x, y })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn peak_correction() {
        let point = quadratic_interpolation(
            Point {
                x: -1.5,
                y: -(1.5 * 1.5) + 4.0,
            },
            Point {
                x: -0.5,
                y: -(0.5 * 0.5) + 4.0,
            },
            Point {
                x: 0.5,
                y: -(0.5 * 0.5) + 4.0,
            },
        )
        .unwrap();
        assert_eq!(point.x, 0.0);
        assert_eq!(point.y, 4.0);
    }

    #[test]
    fn flat_peak_is_not_shifted() {
        let data = [1.0, 1.0, 1.0, 0.5];
        assert_eq!(correct_peak((1, 1.0), &data, PeakCorrection::Quadratic), (1.0, 1.0));
    }

    #[test]
    fn edge_peak_is_not_shifted() {
        let data = [0.2, 0.5, 0.9];
        assert_eq!(correct_peak((2, 0.9), &data, PeakCorrection::Quadratic), (2.0, 0.9));
        assert_eq!(correct_peak((0, 0.2), &data, PeakCorrection::Quadratic), (0.0, 0.2));
    }

    #[test]
    fn uncorrected_peak_stays_on_the_lag() {
        let data = [0.0, 3.0, 4.0, 1.0];
        assert_eq!(correct_peak((2, 4.0), &data, PeakCorrection::None), (2.0, 4.0));
        let (x, _) = correct_peak((2, 4.0), &data, PeakCorrection::Quadratic);
        assert!(x < 2.0);
    }

    #[test]
    fn skip_descending_stops_at_first_rise() {
        let data = [5.0, 3.0, 1.0, 1.0, 2.0];
        assert_eq!(skip_descending(&data), 2);
        assert_eq!(skip_descending(&[4.0, 3.0, 2.0]), 2);
        assert_eq!(skip_descending::<f64>(&[]), 0);
    }

    #[test]
    fn max_peak_prefers_first_maximum() {
        let data = [9.0, 1.0, 4.0, 2.0, 4.0];
        assert_eq!(find_max_peak(&data, 1), Some((2, 4.0)));
        assert_eq!(find_max_peak(&data, 0), Some((0, 9.0)));
        assert_eq!(find_max_peak(&data, 5), None);
    }
}
