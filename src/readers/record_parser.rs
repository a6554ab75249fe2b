use crate::error::RecordDefect;
use crate::models::Temperature;
use crate::utils::constants::{FIELD_SEPARATOR, MAX_STATION_NAME_LEN};

/// Split one line into station name bytes and a fixed-point temperature.
///
/// The last `;` separates name from value. A single trailing `\r` is ignored.
/// The name is only length-checked here; UTF-8 is checked when the name first
/// enters an accumulator map.
#[inline]
pub fn parse_record(line: &[u8]) -> Result<(&[u8], Temperature), RecordDefect> {
    let line = match line.split_last() {
        Some((b'\r', rest)) => rest,
        _ => line,
    };

    let separator = line
        .iter()
        .rposition(|&b| b == FIELD_SEPARATOR)
        .ok_or(RecordDefect::MissingSeparator)?;

    let name = &line[..separator];
    if name.is_empty() {
        return Err(RecordDefect::EmptyName);
    }
    if name.len() > MAX_STATION_NAME_LEN {
        return Err(RecordDefect::NameTooLong(name.len()));
    }

    let temperature = parse_temperature(&line[separator + 1..])?;
    Ok((name, temperature))
}

/// Parse `-?[0-9]{1,2}\.[0-9]` straight into tenths of a degree
#[inline]
pub fn parse_temperature(text: &[u8]) -> Result<Temperature, RecordDefect> {
    let (negative, digits) = match text.split_first() {
        Some((b'-', rest)) => (true, rest),
        _ => (false, text),
    };

    let magnitude = match *digits {
        [units, b'.', fraction] if units.is_ascii_digit() && fraction.is_ascii_digit() => {
            digit(units) * 10 + digit(fraction)
        }
        [tens, units, b'.', fraction]
            if tens.is_ascii_digit() && units.is_ascii_digit() && fraction.is_ascii_digit() =>
        {
            digit(tens) * 100 + digit(units) * 10 + digit(fraction)
        }
        _ => return Err(RecordDefect::InvalidTemperature),
    };

    let tenths = if negative { -magnitude } else { magnitude };
    Temperature::from_tenths(tenths).ok_or(RecordDefect::InvalidTemperature)
}

#[inline]
fn digit(byte: u8) -> i16 {
    (byte - b'0') as i16
}
