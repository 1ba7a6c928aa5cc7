//! Integration tests for BitGrid.
//!
//! Covers:
//! - Creation over the supported size domain
//! - Set/toggle/replace_all validation
//! - Stream text, JSON and binary forms

use pixelbits::bitgrid::parse_stream;
use pixelbits::{BitGrid, PixelError, Result, SizeDomain};

#[test]
fn test_create_every_supported_side() -> Result<()> {
    let domain = SizeDomain::default();
    let sliders = (domain.slider_min..=domain.slider_max).step_by(domain.slider_step);
    for side in domain.discrete.iter().copied().chain(sliders) {
        let grid = BitGrid::new(side)?;
        assert_eq!(grid.num_bits(), side * side);
        assert!(grid.iter().all(|v| v == 0));
    }
    Ok(())
}

#[test]
fn test_create_zero_side_fails() {
    assert!(matches!(
        BitGrid::new(0),
        Err(PixelError::InvalidSize { side: 0 })
    ));
}

#[test]
fn test_filled() -> Result<()> {
    let grid = BitGrid::filled(3, 1)?;
    assert_eq!(grid.num_set(), 9);
    assert!(matches!(BitGrid::filled(3, 2), Err(PixelError::InvalidBit(2))));
    Ok(())
}

#[test]
fn test_set_out_of_range_leaves_grid() -> Result<()> {
    let mut grid = BitGrid::new(4)?;
    grid.set(3, 1)?;
    let before = grid.clone();

    assert!(matches!(
        grid.set(16, 1),
        Err(PixelError::IndexOutOfRange {
            index: 16,
            length: 16
        })
    ));
    assert!(matches!(grid.set(2, 7), Err(PixelError::InvalidBit(7))));
    assert_eq!(grid, before);
    Ok(())
}

#[test]
fn test_toggle_returns_new_value() -> Result<()> {
    let mut grid = BitGrid::new(2)?;
    assert_eq!(grid.toggle(1)?, 1);
    assert_eq!(grid.toggle(1)?, 0);
    assert!(grid.toggle(4).is_err());
    Ok(())
}

#[test]
fn test_replace_all_length_mismatch() -> Result<()> {
    let mut grid = BitGrid::from_cells(2, &[1, 1, 0, 0])?;
    let err = grid.replace_all(&[1, 0, 1]).unwrap_err();
    assert!(matches!(
        err,
        PixelError::LengthMismatch {
            expected: 4,
            actual: 3
        }
    ));
    assert_eq!(err.to_string(), "Length mismatch: need 4 bits, got 3");
    assert_eq!(grid.cells(), vec![1, 1, 0, 0]);

    grid.replace_all(&[0, 0, 1, 1])?;
    assert_eq!(grid.cells(), vec![0, 0, 1, 1]);
    Ok(())
}

#[test]
fn test_replace_all_bad_value_is_atomic() -> Result<()> {
    let mut grid = BitGrid::new(2)?;
    assert!(grid.replace_all(&[1, 1, 5, 1]).is_err());
    assert_eq!(grid.num_set(), 0);
    Ok(())
}

#[test]
fn test_resize_discards_content() -> Result<()> {
    let grid = BitGrid::filled(4, 1)?;
    let bigger = grid.resized(8)?;
    assert_eq!(bigger.side(), 8);
    assert_eq!(bigger.num_bits(), 64);
    assert_eq!(bigger.num_set(), 0);
    // original untouched
    assert_eq!(grid.num_set(), 16);
    Ok(())
}

#[test]
fn test_rows_and_coords() -> Result<()> {
    let grid = BitGrid::from_stream(3, "100010001")?;
    assert_eq!(grid.rows(), vec![vec![1, 0, 0], vec![0, 1, 0], vec![0, 0, 1]]);
    assert_eq!(grid.coords(5)?, (1, 2));
    assert_eq!(grid.index_of(2, 1), Some(7));
    assert_eq!(grid.index_of(3, 0), None);
    assert_eq!(grid.to_string(), "100\n010\n001");
    Ok(())
}

#[test]
fn test_stream_text() -> Result<()> {
    assert_eq!(parse_stream("1a0 b1\n0"), vec![1, 0, 1, 0]);
    let grid = BitGrid::from_stream(2, "1010")?;
    assert_eq!(grid.to_stream(), "1010");
    assert!(BitGrid::from_stream(2, "10 10").is_err());
    Ok(())
}

#[test]
fn test_json_form() -> Result<()> {
    let grid = BitGrid::from_stream(2, "0110")?;
    let json = serde_json::to_string(&grid)?;
    assert_eq!(json, r#"{"side":2,"cells":"0110"}"#);

    let back: BitGrid = serde_json::from_str(&json)?;
    assert_eq!(back, grid);

    let bad = serde_json::from_str::<BitGrid>(r#"{"side":2,"cells":"011"}"#);
    assert!(bad.is_err());
    Ok(())
}

#[test]
fn test_binary_snapshot() -> Result<()> {
    let grid = BitGrid::from_stream(3, "101010101")?;
    let bytes = grid.to_bytes()?;
    assert_eq!(BitGrid::from_bytes(&bytes)?, grid);
    assert!(BitGrid::from_bytes(&bytes[..2]).is_err());
    Ok(())
}
