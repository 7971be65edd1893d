//! Cell references and the A1-notation codec

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// A cell reference (e.g., "A1", "ZZ100")
///
/// Column letters are bijective base-26: A through Z cover the first 26
/// columns, then AA, AB and so on. Row numbers are 1-based in notation.
/// Internally both coordinates are 0-based, so "A1" is row 0, column 0
/// and "B10" is row 9, column 1. References carry no sheet name and no
/// absolute markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellRef {
    /// Row index (0-based)
    pub row: u32,
    /// Column index (0-based, A = 0)
    pub col: u32,
}

impl CellRef {
    /// Create a new cell reference from 0-based coordinates
    pub fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }

    /// Parse a reference in A1 notation
    ///
    /// The input must be one run of ASCII letters followed by one run of
    /// ASCII digits and nothing else. Letters match case-insensitively and
    /// the row number must be at least 1.
    ///
    /// # Examples
    ///
    /// ```
    /// use gridcalc_core::CellRef;
    ///
    /// let a1 = CellRef::parse("A1").unwrap();
    /// assert_eq!((a1.row, a1.col), (0, 0));
    ///
    /// let b10 = CellRef::parse("b10").unwrap();
    /// assert_eq!((b10.row, b10.col), (9, 1));
    ///
    /// assert!(CellRef::parse("1A").is_err());
    /// assert!(CellRef::parse("$A$1").is_err());
    /// ```
    pub fn parse(input: &str) -> Result<Self> {
        let s = input.trim();
        if s.is_empty() {
            return Err(Error::InvalidReference("empty reference".to_string()));
        }

        let bytes = s.as_bytes();
        let mut pos = 0;

        while pos < bytes.len() && bytes[pos].is_ascii_alphabetic() {
            pos += 1;
        }

        if pos == 0 {
            return Err(Error::InvalidReference(format!(
                "no column letters in '{}'",
                s
            )));
        }

        let col = Self::letters_to_column(&s[..pos])?;

        let row_digits = &s[pos..];
        if row_digits.is_empty() || !row_digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::InvalidReference(format!(
                "invalid row number in '{}'",
                s
            )));
        }

        let row: u32 = row_digits
            .parse()
            .map_err(|_| Error::InvalidReference(format!("row number out of range in '{}'", s)))?;

        // Row numbers are 1-based in notation
        if row == 0 {
            return Err(Error::InvalidReference(format!(
                "row number must be at least 1 in '{}'",
                s
            )));
        }

        Ok(Self { row: row - 1, col })
    }

    /// Convert a column index to letters (0 = A, 25 = Z, 26 = AA, etc.)
    pub fn column_to_letters(col: u32) -> String {
        let mut letters = String::new();
        let mut n = col as u64 + 1; // 1-based for the conversion

        while n > 0 {
            n -= 1;
            let c = ((n % 26) as u8 + b'A') as char;
            letters.insert(0, c);
            n /= 26;
        }

        letters
    }

    /// Convert column letters to an index (A = 0, Z = 25, AA = 26, etc.)
    ///
    /// Letters are accepted in either case.
    pub fn letters_to_column(letters: &str) -> Result<u32> {
        if letters.is_empty() {
            return Err(Error::InvalidReference(
                "empty column letters".to_string(),
            ));
        }

        let mut col: u64 = 0;
        for c in letters.chars() {
            if !c.is_ascii_alphabetic() {
                return Err(Error::InvalidReference(format!(
                    "invalid column letter '{}'",
                    c
                )));
            }
            col = col * 26 + (c.to_ascii_uppercase() as u64 - 'A' as u64 + 1);
            if col > u32::MAX as u64 + 1 {
                return Err(Error::ColumnOutOfRange(letters.to_string()));
            }
        }

        Ok((col - 1) as u32)
    }

    /// Format as an A1-notation string
    pub fn to_a1_string(&self) -> String {
        format!(
            "{}{}",
            Self::column_to_letters(self.col),
            self.row as u64 + 1
        )
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_a1_string())
    }
}

impl FromStr for CellRef {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_column_to_letters() {
        assert_eq!(CellRef::column_to_letters(0), "A");
        assert_eq!(CellRef::column_to_letters(1), "B");
        assert_eq!(CellRef::column_to_letters(25), "Z");
        assert_eq!(CellRef::column_to_letters(26), "AA");
        assert_eq!(CellRef::column_to_letters(27), "AB");
        assert_eq!(CellRef::column_to_letters(51), "AZ");
        assert_eq!(CellRef::column_to_letters(52), "BA");
        assert_eq!(CellRef::column_to_letters(701), "ZZ");
        assert_eq!(CellRef::column_to_letters(702), "AAA");
    }

    #[test]
    fn test_letters_to_column() {
        assert_eq!(CellRef::letters_to_column("A").unwrap(), 0);
        assert_eq!(CellRef::letters_to_column("B").unwrap(), 1);
        assert_eq!(CellRef::letters_to_column("Z").unwrap(), 25);
        assert_eq!(CellRef::letters_to_column("AA").unwrap(), 26);
        assert_eq!(CellRef::letters_to_column("AB").unwrap(), 27);
        assert_eq!(CellRef::letters_to_column("ZZ").unwrap(), 701);
        assert_eq!(CellRef::letters_to_column("AAA").unwrap(), 702);
    }

    #[test]
    fn test_letters_to_column_case_insensitive() {
        assert_eq!(CellRef::letters_to_column("a").unwrap(), 0);
        assert_eq!(CellRef::letters_to_column("aa").unwrap(), 26);
        assert_eq!(CellRef::letters_to_column("Zz").unwrap(), 701);
    }

    #[test]
    fn test_letters_to_column_errors() {
        assert!(CellRef::letters_to_column("").is_err());
        assert!(CellRef::letters_to_column("A1").is_err());
        assert!(CellRef::letters_to_column("$A").is_err());
        // Ten letters encode far past u32::MAX
        assert!(CellRef::letters_to_column("ZZZZZZZZZZ").is_err());
    }

    #[test]
    fn test_parse() {
        assert_eq!(CellRef::parse("A1").unwrap(), CellRef::new(0, 0));
        assert_eq!(CellRef::parse("B10").unwrap(), CellRef::new(9, 1));
        assert_eq!(CellRef::parse("Z1").unwrap(), CellRef::new(0, 25));
        assert_eq!(CellRef::parse("AA1").unwrap(), CellRef::new(0, 26));
        assert_eq!(CellRef::parse("ZZ100").unwrap(), CellRef::new(99, 701));
    }

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!(CellRef::parse("a1").unwrap(), CellRef::new(0, 0));
        assert_eq!(CellRef::parse("zz99").unwrap(), CellRef::new(98, 701));
    }

    #[test]
    fn test_parse_leading_zeros() {
        assert_eq!(CellRef::parse("A01").unwrap(), CellRef::new(0, 0));
        assert_eq!(CellRef::parse("B007").unwrap(), CellRef::new(6, 1));
    }

    #[test]
    fn test_parse_errors() {
        assert!(CellRef::parse("").is_err());
        assert!(CellRef::parse("A").is_err());
        assert!(CellRef::parse("1").is_err());
        assert!(CellRef::parse("1A").is_err());
        assert!(CellRef::parse("A1B").is_err());
        assert!(CellRef::parse("$A$1").is_err());
        assert!(CellRef::parse("A 1").is_err());
        assert!(CellRef::parse("A+1").is_err());
        assert!(CellRef::parse("A1:B2").is_err());
    }

    #[test]
    fn test_parse_row_zero_rejected() {
        assert!(CellRef::parse("A0").is_err());
        assert!(CellRef::parse("ZZ0").is_err());
        assert!(CellRef::parse("A00").is_err());
    }

    #[test]
    fn test_parse_row_out_of_range() {
        // u32::MAX is 4294967295; the 1-based row 4294967296 does not fit
        assert!(CellRef::parse("A4294967296").is_err());
        assert_eq!(
            CellRef::parse("A4294967295").unwrap(),
            CellRef::new(4294967294, 0)
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(CellRef::new(0, 0).to_string(), "A1");
        assert_eq!(CellRef::new(9, 1).to_string(), "B10");
        assert_eq!(CellRef::new(99, 701).to_string(), "ZZ100");
        assert_eq!(CellRef::new(0, 702).to_string(), "AAA1");
    }

    #[test]
    fn test_from_str() {
        let at: CellRef = "C3".parse().unwrap();
        assert_eq!(at, CellRef::new(2, 2));
        assert!("3C".parse::<CellRef>().is_err());
    }

    #[test]
    fn test_ordering_is_row_major() {
        let mut refs = vec![
            CellRef::new(1, 0),
            CellRef::new(0, 1),
            CellRef::new(0, 0),
            CellRef::new(1, 1),
        ];
        refs.sort();
        assert_eq!(
            refs,
            vec![
                CellRef::new(0, 0),
                CellRef::new(0, 1),
                CellRef::new(1, 0),
                CellRef::new(1, 1),
            ]
        );
    }

    proptest! {
        #[test]
        fn prop_column_letters_roundtrip(col in 0u32..2_000_000) {
            let letters = CellRef::column_to_letters(col);
            prop_assert_eq!(CellRef::letters_to_column(&letters).unwrap(), col);
        }

        #[test]
        fn prop_reference_roundtrip(row in 0u32..5_000_000, col in 0u32..100_000) {
            let at = CellRef::new(row, col);
            prop_assert_eq!(CellRef::parse(&at.to_string()).unwrap(), at);
        }

        #[test]
        fn prop_letters_are_uppercase_alphabetic(col in 0u32..1_000_000) {
            let letters = CellRef::column_to_letters(col);
            prop_assert!(!letters.is_empty());
            prop_assert!(letters.bytes().all(|b| b.is_ascii_uppercase()));
        }
    }
}
