//! Line-oriented process file ingestion.
//!
//! Each non-blank line holds `id, arrival, burst, priority`. Fields are
//! separated by whitespace and/or a single non-digit delimiter character, so
//! `1,0,4,2`, `1 0 4 2` and `1; 0; 4; 2` all parse the same. Any malformed
//! line rejects the whole file; nothing is silently zero-filled.

use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::{
    core::Ticks,
    error::{FieldError, LoadError},
    sim::{ProcessId, ProcessRecord},
};

pub fn load(path: &Path) -> Result<Vec<ProcessRecord>, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let records = parse(BufReader::new(file))?;
    debug!(path = %path.display(), processes = records.len(), "loaded process file");
    Ok(records)
}

/// Parses every line of `reader`, keeping file order.
pub fn parse(reader: impl BufRead) -> Result<Vec<ProcessRecord>, LoadError> {
    let mut records = Vec::new();
    // id --> line it was first seen on
    let mut seen: FxHashMap<ProcessId, usize> = FxHashMap::default();

    for (index, line) in reader.lines().enumerate() {
        let line_no = index + 1;
        let line = line.map_err(|source| LoadError::Read {
            line: line_no,
            source,
        })?;
        if line.trim().is_empty() {
            continue;
        }

        let record = parse_line(&line).map_err(|reason| LoadError::Parse {
            line: line_no,
            reason,
        })?;
        if let Some(&first_line) = seen.get(&record.id) {
            return Err(LoadError::DuplicateId {
                line: line_no,
                id: record.id,
                first_line,
            });
        }
        seen.insert(record.id, line_no);
        records.push(record);
    }

    Ok(records)
}

pub fn parse_line(line: &str) -> Result<ProcessRecord, FieldError> {
    let mut fields = Fields::new(line);
    let id = fields.next_int("id")?;
    let arrival = fields.next_int("arrival")?;
    let burst = fields.next_int("burst")?;
    let priority = fields.next_int("priority")?;
    fields.finish()?;

    let arrival_time =
        Ticks::try_from(arrival).map_err(|_| FieldError::NegativeArrival(arrival))?;
    let burst_duration = match Ticks::try_from(burst) {
        Ok(burst) if burst > 0 => burst,
        _ => return Err(FieldError::NonPositiveBurst(burst)),
    };

    Ok(ProcessRecord::new(id, arrival_time, burst_duration, priority))
}

struct Fields<'a> {
    rest: &'a str,
    first: bool,
}

impl<'a> Fields<'a> {
    fn new(line: &'a str) -> Self {
        Self {
            rest: line,
            first: true,
        }
    }

    fn next_int(&mut self, field: &'static str) -> Result<i64, FieldError> {
        if !self.first {
            self.skip_separator();
        }
        self.first = false;

        let text = self.rest.trim_start();
        let sign_len = usize::from(text.starts_with(['-', '+']));
        let digits = text[sign_len..]
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(text.len() - sign_len);
        if digits == 0 {
            return Err(FieldError::Missing { field });
        }

        let (number, rest) = text.split_at(sign_len + digits);
        self.rest = rest;
        number.parse().map_err(|source| FieldError::OutOfRange {
            field,
            text: number.to_string(),
            source,
        })
    }

    // Whitespace, then at most one delimiter. A sign right after whitespace
    // belongs to the next number, not the separator.
    fn skip_separator(&mut self) {
        let trimmed = self.rest.trim_start();
        let had_space = trimmed.len() != self.rest.len();
        let mut chars = trimmed.chars();
        self.rest = match chars.next() {
            Some(c) if c.is_ascii_digit() => trimmed,
            Some('-' | '+') if had_space => trimmed,
            Some(_) => chars.as_str(),
            None => trimmed,
        };
    }

    fn finish(self) -> Result<(), FieldError> {
        let rest = self.rest.trim();
        if rest.is_empty() {
            Ok(())
        } else {
            Err(FieldError::Trailing(rest.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_common_delimiters() {
        for line in ["1,0,4,2", "1 0 4 2", "1, 0, 4, 2", "1;0;4;2", "  1\t0\t4\t2  ", "1 , 0 , 4 , 2"] {
            assert_eq!(parse_line(line), Ok(ProcessRecord::new(1, 0, 4, 2)), "{line:?}");
        }
    }

    #[test]
    fn negative_priority_with_either_delimiter() {
        assert_eq!(parse_line("3,2,1,-5"), Ok(ProcessRecord::new(3, 2, 1, -5)));
        assert_eq!(parse_line("3 2 1 -5"), Ok(ProcessRecord::new(3, 2, 1, -5)));
        assert_eq!(parse_line("3-2-1--5"), Ok(ProcessRecord::new(3, 2, 1, -5)));
    }

    #[test]
    fn rejects_bad_fields() {
        assert_eq!(
            parse_line("1,0,x,2"),
            Err(FieldError::Missing { field: "burst" })
        );
        assert_eq!(
            parse_line("1,0,4"),
            Err(FieldError::Missing { field: "priority" })
        );
        assert_eq!(
            parse_line("1,,4,2"),
            Err(FieldError::Missing { field: "arrival" })
        );
        assert_eq!(parse_line("1,-3,4,2"), Err(FieldError::NegativeArrival(-3)));
        assert_eq!(parse_line("1,0,0,2"), Err(FieldError::NonPositiveBurst(0)));
        assert_eq!(parse_line("1,0,-2,2"), Err(FieldError::NonPositiveBurst(-2)));
        assert_eq!(
            parse_line("1,0,4,2,9"),
            Err(FieldError::Trailing(",9".to_string()))
        );
        assert!(matches!(
            parse_line("1,0,99999999999999999999,2"),
            Err(FieldError::OutOfRange { field: "burst", .. })
        ));
        assert_eq!(
            parse_line("1,0,4,2;").unwrap_err().to_string(),
            "unexpected trailing input \";\""
        );
    }

    #[test]
    fn keeps_file_order_and_skips_blank_lines() {
        let input = "2,5,1,0\n\n1,0,3,1\r\n   \n3,0,2,0\n";
        let records = parse(input.as_bytes()).unwrap();
        let ids: Vec<_> = records.iter().map(|record| record.id).collect();
        assert_eq!(ids, vec![2, 1, 3]);
    }

    #[test]
    fn parse_error_reports_line_number() {
        let input = "1,0,3,1\n\n2,1,abc,0\n";
        match parse(input.as_bytes()) {
            Err(LoadError::Parse { line, reason }) => {
                assert_eq!(line, 3);
                assert_eq!(reason, FieldError::Missing { field: "burst" });
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let input = "7,0,3,1\n8,1,2,0\n7,2,2,0\n";
        match parse(input.as_bytes()) {
            Err(LoadError::DuplicateId { line, id, first_line }) => {
                assert_eq!((line, id, first_line), (3, 7, 1));
            }
            other => panic!("expected duplicate id error, got {other:?}"),
        }
    }

    #[test]
    fn missing_file_is_an_open_error() {
        let err = load(Path::new("/definitely/not/here.txt")).unwrap_err();
        assert!(matches!(err, LoadError::Open { .. }));
    }
}
