use hp_structure::DotBracket;
use hp_structure::DotBracketVec;

use crate::Base;

/// First-fit pairing: for each `i` in ascending order, pair `i` with the
/// first unpaired `j > i` that is complementary to it.
///
/// Pairs are returned in the order they were formed. An `i` that was
/// already consumed as the `j` of an earlier pair is skipped. The pairs
/// themselves may cross (GGCC forms (0, 2) and (1, 3)).
pub fn greedy_pairs(seq: &[Base]) -> Vec<(usize, usize)> {
    let n = seq.len();
    let mut paired = vec![false; n];
    let mut pairs = Vec::new();

    for i in 0..n {
        for j in (i + 1)..n {
            if !paired[i] && !paired[j] && seq[i].pairs_with(seq[j]) {
                paired[i] = true;
                paired[j] = true;
                pairs.push((i, j));
                break;
            }
        }
    }
    pairs
}

/// The dot-bracket string of [`greedy_pairs`]: '(' at every `i`, ')' at
/// every `j`.
///
/// Every ')' is preceded by its own '(', so the string is always balanced
/// even where the underlying pairs cross.
pub fn greedy_structure(seq: &[Base]) -> DotBracketVec {
    let mut structure = DotBracketVec::unpaired(seq.len());
    for (i, j) in greedy_pairs(seq) {
        structure[i] = DotBracket::Open;
        structure[j] = DotBracket::Close;
    }
    structure
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::Sequence;
    use hp_structure::PairTable;
    use rand::Rng;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn fold(s: &str) -> String {
        let seq = Sequence::try_from(s).unwrap();
        greedy_structure(&seq).to_string()
    }

    #[test]
    fn test_greedy_fixtures() {
        assert_eq!(fold(""), "");
        assert_eq!(fold("G"), ".");
        assert_eq!(fold("GGCC"), "(())");
        assert_eq!(fold("AUAU"), "()()");
        assert_eq!(fold("GGGG"), "....");
        assert_eq!(fold("UUUU"), "....");
        assert_eq!(fold("GCAU"), "()()");
        assert_eq!(fold("ACGU"), "(())");
        assert_eq!(fold("AUGCAU"), "()()()");
        assert_eq!(fold("GGGAAACCC"), "(((...)))");
    }

    #[test]
    fn test_greedy_pairs_can_cross() {
        let seq = Sequence::try_from("GGCC").unwrap();
        assert_eq!(greedy_pairs(&seq), vec![(0, 2), (1, 3)]);

        // The rendered string reads back as nested pairs.
        let pt = PairTable::try_from(&greedy_structure(&seq)).unwrap();
        assert_eq!(pt.pairs().collect::<Vec<_>>(), vec![(0, 3), (1, 2)]);
    }

    #[test]
    fn test_greedy_skips_consumed_positions() {
        // i = 1 was already used as the partner of 0.
        let seq = Sequence::try_from("AUU").unwrap();
        assert_eq!(greedy_pairs(&seq), vec![(0, 1)]);
        assert_eq!(greedy_structure(&seq).to_string(), "().");
    }

    #[test]
    fn test_random_sequences_are_balanced() {
        let mut rng = StdRng::seed_from_u64(42);
        let alphabet = [Base::A, Base::C, Base::G, Base::U];
        for _ in 0..500 {
            let len = rng.random_range(0..120);
            let seq: Vec<Base> = (0..len)
                .map(|_| alphabet[rng.random_range(0..alphabet.len())])
                .collect();
            let structure = greedy_structure(&seq);
            assert_eq!(structure.len(), seq.len());
            assert!(structure.is_balanced(), "{}", structure);
            for (i, j) in greedy_pairs(&seq) {
                assert!(i < j);
                assert!(seq[i].pairs_with(seq[j]));
            }
        }
    }
}
