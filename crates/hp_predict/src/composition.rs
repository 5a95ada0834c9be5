use crate::Base;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompositionMetrics {
    pub length: usize,
    /// Fraction of G and C in [0, 1]; 0.0 for the empty sequence.
    pub gc_content: f64,
}

impl CompositionMetrics {
    pub fn of(seq: &[Base]) -> Self {
        let length = seq.len();
        let gc = seq.iter().filter(|b| b.is_gc()).count();
        let gc_content = if length == 0 {
            0.0
        } else {
            gc as f64 / length as f64
        };
        CompositionMetrics { length, gc_content }
    }

    pub fn gc_percent(&self) -> f64 {
        self.gc_content * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Sequence;

    fn metrics(s: &str) -> CompositionMetrics {
        CompositionMetrics::of(&Sequence::try_from(s).unwrap())
    }

    #[test]
    fn test_gc_content() {
        assert_eq!(metrics("GGGG").gc_content, 1.0);
        assert_eq!(metrics("AUAU").gc_content, 0.0);
        assert_eq!(metrics("GCAU").gc_content, 0.5);
        assert_eq!(metrics("GGGAUAACUUCGGUUGUCCC").gc_content, 0.55);
    }

    #[test]
    fn test_empty_sequence() {
        let m = metrics("");
        assert_eq!(m.length, 0);
        assert_eq!(m.gc_content, 0.0);
    }

    #[test]
    fn test_length_and_percent() {
        let m = metrics("GGCGCUUGCGUC");
        assert_eq!(m.length, 12);
        assert!((m.gc_percent() - 75.0).abs() < 1e-9);
    }
}
