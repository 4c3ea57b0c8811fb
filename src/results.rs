use std::collections::BTreeSet;
use std::io::Read;

use crate::error::Result;

/// One `energy group_size bits` triple from the solver output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolverReadout {
    pub energy: i64,
    /// Read to keep the token stream aligned; not used otherwise
    pub group_size: i64,
    pub bits: String,
}

/// Normalize a bit string so its first symbol maps to `'0'`.
///
/// Every position equal to the first symbol becomes `'0'`, every other
/// position `'1'`. Works for any alphabet.
pub fn canonicalize(bits: &str) -> String {
    let mut chars = bits.chars();
    let first = match chars.next() {
        Some(c) => c,
        None => return String::new(),
    };
    std::iter::once('0')
        .chain(chars.map(|c| if c == first { '0' } else { '1' }))
        .collect()
}

/// True for a non-empty canonical string with as many `'0'` as `'1'`.
pub fn is_balanced(canonical: &str) -> bool {
    let len = canonical.chars().count();
    let zeros = canonical.chars().filter(|&c| c == '0').count();
    len > 0 && zeros * 2 == len
}

/// Distinct canonical partitions sharing the lowest energy seen so far
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SolutionSet {
    best_energy: Option<i64>,
    solutions: BTreeSet<String>,
}

impl SolutionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consider one readout. Returns true if it ended up in the set.
    pub fn offer(&mut self, readout: &SolverReadout) -> bool {
        let canonical = canonicalize(&readout.bits);
        if !is_balanced(&canonical) {
            log::debug!("Discarding unbalanced partition {}", readout.bits);
            return false;
        }

        match self.best_energy {
            Some(best) if readout.energy > best => false,
            Some(best) if readout.energy == best => {
                self.solutions.insert(canonical);
                true
            }
            previous => {
                if let Some(best) = previous {
                    log::debug!("Energy improved from {} to {}", best, readout.energy);
                }
                self.solutions.clear();
                self.solutions.insert(canonical);
                self.best_energy = Some(readout.energy);
                true
            }
        }
    }

    pub fn best_energy(&self) -> Option<i64> {
        self.best_energy
    }

    pub fn is_empty(&self) -> bool {
        self.solutions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.solutions.len()
    }

    /// Canonical strings in ascending order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.solutions.iter().map(String::as_str)
    }
}

/// Split solver output into readouts.
///
/// Reading stops quietly at the first triple that is incomplete or whose
/// energy or group size is not an integer.
pub fn read_readouts(text: &str) -> Vec<SolverReadout> {
    let mut tokens = text.split_whitespace();
    let mut readouts = Vec::new();
    loop {
        let energy = match tokens.next().and_then(|t| t.parse::<i64>().ok()) {
            Some(v) => v,
            None => break,
        };
        let group_size = match tokens.next().and_then(|t| t.parse::<i64>().ok()) {
            Some(v) => v,
            None => break,
        };
        let bits = match tokens.next() {
            Some(t) => t.to_string(),
            None => break,
        };
        readouts.push(SolverReadout {
            energy,
            group_size,
            bits,
        });
    }
    readouts
}

/// Read all solver output from `reader` and keep the best balanced partitions.
///
/// Bytes that are not UTF-8 decode to replacement characters, so a triple
/// containing them ends the stream like any other malformed triple.
pub fn parse_results<R: Read>(mut reader: R) -> Result<SolutionSet> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    let text = String::from_utf8_lossy(&bytes);

    let readouts = read_readouts(&text);
    let mut solutions = SolutionSet::new();
    for readout in &readouts {
        solutions.offer(readout);
    }

    log::info!(
        "Read {} readouts, kept {} solutions",
        readouts.len(),
        solutions.len()
    );
    Ok(solutions)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn readout(energy: i64, bits: &str) -> SolverReadout {
        SolverReadout {
            energy,
            group_size: 2,
            bits: bits.to_string(),
        }
    }

    #[test]
    fn test_canonicalize() {
        assert_eq!(canonicalize("0011"), "0011");
        assert_eq!(canonicalize("1100"), "0011");
        assert_eq!(canonicalize("+--+"), "0110");
        assert_eq!(canonicalize(""), "");
    }

    #[test]
    fn test_is_balanced() {
        assert!(is_balanced("0110"));
        assert!(!is_balanced("000"));
        assert!(!is_balanced("0001"));
        assert!(!is_balanced(""));
    }

    #[test]
    fn test_lower_energy_replaces_set() {
        let mut set = SolutionSet::new();
        assert!(set.offer(&readout(5, "0011")));
        assert!(set.offer(&readout(5, "0101")));
        assert_eq!(set.len(), 2);
        assert!(set.offer(&readout(3, "0110")));
        assert_eq!(set.best_energy(), Some(3));
        assert_eq!(set.iter().collect::<Vec<_>>(), vec!["0110"]);
    }

    #[test]
    fn test_higher_energy_ignored() {
        let mut set = SolutionSet::new();
        set.offer(&readout(-4, "0101"));
        assert!(!set.offer(&readout(-2, "0011")));
        assert_eq!(set.iter().collect::<Vec<_>>(), vec!["0101"]);
    }

    #[test]
    fn test_equal_energy_deduplicates_canonical_forms() {
        let mut set = SolutionSet::new();
        set.offer(&readout(1, "0011"));
        set.offer(&readout(1, "1100"));
        set.offer(&readout(1, "0011"));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_unbalanced_discarded_regardless_of_energy() {
        let mut set = SolutionSet::new();
        set.offer(&readout(5, "0011"));
        assert!(!set.offer(&SolverReadout {
            energy: 1,
            group_size: 2,
            bits: "000".to_string(),
        }));
        assert_eq!(set.best_energy(), Some(5));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_read_readouts_stops_at_malformed_triple() {
        let text = "5 2 0011\n3 2 0110\nbogus 2 0101\n1 2 1010\n";
        let readouts = read_readouts(text);
        assert_eq!(readouts, vec![readout(5, "0011"), readout(3, "0110")]);
    }

    #[test]
    fn test_read_readouts_ignores_incomplete_tail() {
        let readouts = read_readouts("-7 2 0101 -9 2");
        assert_eq!(readouts.len(), 1);
        assert_eq!(readouts[0].energy, -7);
    }

    #[test]
    fn test_parse_results_scenario() {
        let input = "5 2 0011\n5 2 0101\n3 2 0110\n";
        let set = parse_results(input.as_bytes()).unwrap();
        assert_eq!(set.best_energy(), Some(3));
        assert_eq!(set.iter().collect::<Vec<_>>(), vec!["0110"]);
    }

    #[test]
    fn test_parse_results_invalid_utf8_ends_stream() {
        let input: &[u8] = b"5 2 0011\n\xff 2 0101\n";
        let set = parse_results(input).unwrap();
        assert_eq!(set.best_energy(), Some(5));
        assert_eq!(set.iter().collect::<Vec<_>>(), vec!["0011"]);
    }

    #[test]
    fn test_parse_results_empty_stream() {
        let set = parse_results("not a readout".as_bytes()).unwrap();
        assert!(set.is_empty());
        assert_eq!(set.best_energy(), None);
    }
}
