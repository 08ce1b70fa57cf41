//! Maps a cumulative wheel rotation onto the entry under the fixed pointer.
//!
//! Slice `i` of `n` covers `[i * 360/n, (i + 1) * 360/n)` degrees, slice 0
//! starting at the top and running clockwise. The pointer sits at the top; a
//! clockwise rotation of `r` degrees brings the wheel angle `360 - r` under it.

use crate::errors::WheelError;

/// Degrees in one full turn.
pub const FULL_TURN: f64 = 360.0;

/// Arc owned by each of `entry_count` slices.
pub fn slice_angle(entry_count: usize) -> Result<f64, WheelError> {
    if entry_count == 0 {
        return Err(WheelError::InvalidEntryCount(entry_count));
    }
    Ok(FULL_TURN / entry_count as f64)
}

/// Reduces any rotation into `[0, 360)`. Non-finite input maps to 0.
pub fn normalize(rotation_degrees: f64) -> f64 {
    if !rotation_degrees.is_finite() {
        return 0.0;
    }
    let normalized = rotation_degrees.rem_euclid(FULL_TURN);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if normalized >= FULL_TURN {
        0.0
    } else {
        normalized
    }
}

/// Wheel angle under the pointer, offset by half a slice so slice centres
/// land on integer boundaries after flooring.
pub fn pointer_angle(total_rotation_degrees: f64, entry_count: usize) -> Result<f64, WheelError> {
    let slice = slice_angle(entry_count)?;
    let normalized = normalize(total_rotation_degrees);
    Ok((FULL_TURN - normalized + slice / 2.0).rem_euclid(FULL_TURN))
}

/// Index of the winning entry for a rotation over `entry_count` slices.
///
/// Always in `[0, entry_count)`; floating point edge results are clamped to
/// the last slice.
///
/// # Examples
///
/// ```
/// use namewheel_engine::selection::select_winner;
///
/// assert_eq!(select_winner(0.0, 6).unwrap(), 0);
/// assert_eq!(select_winner(90.0, 4).unwrap(), 3);
/// assert!(select_winner(10.0, 0).is_err());
/// ```
pub fn select_winner(total_rotation_degrees: f64, entry_count: usize) -> Result<usize, WheelError> {
    let slice = slice_angle(entry_count)?;
    let pointer = pointer_angle(total_rotation_degrees, entry_count)?;
    let index = (pointer / slice).floor();
    if index.is_nan() || index < 0.0 {
        return Ok(0);
    }
    Ok((index as usize).min(entry_count - 1))
}

/// Start and end angle of slice `index`, in degrees from the top.
pub fn slice_bounds(index: usize, entry_count: usize) -> Result<(f64, f64), WheelError> {
    let slice = slice_angle(entry_count)?;
    if index >= entry_count {
        return Err(WheelError::InvalidEntryCount(entry_count));
    }
    let start = index as f64 * slice;
    Ok((start, start + slice))
}
