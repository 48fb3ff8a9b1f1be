//! Fixed column field decoders
use std::str::FromStr;

use crate::{error::ParsingError, reader::Line};

/// Width of a split exponent field: 15 columns of mantissa,
/// the exponent marker, then 3 columns of signed exponent.
const SPLIT_WIDTH: usize = 19;
const MANTISSA_WIDTH: usize = 15;

/// Field starts of navigation rows
const ROW_FIELDS: [usize; 4] = [3, 22, 41, 60];

/// Parses an integer field, blanks around the digits are tolerated.
pub(crate) fn parse_int<T: FromStr>(content: &str) -> Result<T, ParsingError> {
    let trimmed = content.trim();
    T::from_str(trimmed).or(Err(ParsingError::Integer(content.to_string())))
}

/// Parses a float field, an all blank field is `default`.
pub(crate) fn parse_float_or(content: &str, default: f64) -> Result<f64, ParsingError> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        Ok(default)
    } else {
        f64::from_str(trimmed).or(Err(ParsingError::Float(content.to_string())))
    }
}

/// Splits a satellite label like "G05" into its system letter and PRN.
pub(crate) fn split_sv_label(label: &str) -> Option<(char, u8)> {
    let mut chars = label.chars();
    let system = chars.next()?;
    let prn = chars.as_str().trim().parse::<u8>().ok()?;
    Some((system, prn))
}

/// Decodes the split exponent field starting at column `start`.
/// An all blank field is exactly 0.0.
pub(crate) fn parse_split_exponent(line: &Line, start: usize) -> Result<f64, ParsingError> {
    let field = line.field(start, start + SPLIT_WIDTH);
    if field.trim().is_empty() {
        return Ok(0.0);
    }
    let mantissa = line.field(start, start + MANTISSA_WIDTH).trim();
    let exponent = line
        .field(start + MANTISSA_WIDTH + 1, start + SPLIT_WIDTH)
        .trim();
    let literal = format!("{}e{}", mantissa, exponent);
    f64::from_str(&literal).or(Err(ParsingError::Float(field.to_string())))
}

/// Decodes the two leading fields of a navigation row.
pub(crate) fn parse_row2(line: &Line) -> Result<(f64, f64), ParsingError> {
    Ok((
        parse_split_exponent(line, ROW_FIELDS[0])?,
        parse_split_exponent(line, ROW_FIELDS[1])?,
    ))
}

/// Decodes the three trailing fields of a navigation row (clock fields).
pub(crate) fn parse_row3(line: &Line) -> Result<(f64, f64, f64), ParsingError> {
    Ok((
        parse_split_exponent(line, ROW_FIELDS[1])?,
        parse_split_exponent(line, ROW_FIELDS[2])?,
        parse_split_exponent(line, ROW_FIELDS[3])?,
    ))
}

/// Decodes the four fields of a navigation orbit row.
pub(crate) fn parse_row4(line: &Line) -> Result<(f64, f64, f64, f64), ParsingError> {
    let a = parse_split_exponent(line, ROW_FIELDS[0])?;
    let (b, c, d) = parse_row3(line)?;
    Ok((a, b, c, d))
}
