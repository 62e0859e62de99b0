//! The four benchmarked implementations and the speed-up pairs formed
//! between them.

use std::fmt;

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy)]
/// One benchmarked implementation of the matching algorithm. The declaration
/// order is the row order of a results table.
pub enum Variant {
    /// sequential, including host copies
    SeqWithCopy,
    /// sequential
    Seq,
    /// parallel, including device allocation and copies
    ParWithCopy,
    /// parallel
    Par,
}

impl Variant {
    /// All variants in table row order.
    pub const ALL: [Variant; 4] = [
        Variant::SeqWithCopy,
        Variant::Seq,
        Variant::ParWithCopy,
        Variant::Par,
    ];

    /// Row position inside a results table.
    pub fn ordinal(self) -> usize {
        self as usize
    }

    /// Short name, e.g. `seq_with_copy`.
    pub fn name(self) -> &'static str {
        match self {
            Variant::SeqWithCopy => "seq_with_copy",
            Variant::Seq => "seq",
            Variant::ParWithCopy => "par_with_copy",
            Variant::Par => "par",
        }
    }

    /// Label the benchmark writes into the `id` column and into raw sample
    /// file names.
    pub fn bench_id(self) -> &'static str {
        match self {
            Variant::SeqWithCopy => "cpu_seq_c_exec",
            Variant::Seq => "cpu_seq_exec",
            Variant::ParWithCopy => "gpu_par_c_exec",
            Variant::Par => "gpu_par_exec",
        }
    }

    /// Name of the series in charts.
    pub fn series_name(self) -> &'static str {
        match self {
            Variant::SeqWithCopy => "sequentialWithCopy",
            Variant::Seq => "sequential",
            Variant::ParWithCopy => "parallelWithCopy",
            Variant::Par => "parallel",
        }
    }

    /// Whether `id` names this variant. An empty id is accepted.
    pub fn accepts_id(self, id: &str) -> bool {
        id.is_empty() || id == self.name() || id == self.bench_id()
    }

    /// Classifies a raw sample file by name. `cpu_seq_c` has to be tested
    /// before its prefix `cpu_seq`.
    pub fn from_sample_file(name: &str) -> Option<Variant> {
        if name.contains("cpu_seq_c") {
            Some(Variant::SeqWithCopy)
        } else if name.contains("cpu_seq") {
            Some(Variant::Seq)
        } else if name.contains("gpu_par_c") {
            Some(Variant::ParWithCopy)
        } else if name.contains("gpu_par") {
            Some(Variant::Par)
        } else {
            None
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy)]
/// A baseline/target pair; the ratio baseline / target says how many times
/// faster the target is.
pub enum SpeedUpPair {
    /// `seq_with_copy -> par_with_copy`
    SeqWithCopyToParWithCopy,
    /// `seq_with_copy -> par`
    SeqWithCopyToPar,
    /// `seq -> par_with_copy`
    SeqToParWithCopy,
    /// `seq -> par`
    SeqToPar,
}

impl SpeedUpPair {
    /// All pairs in the order of the speed-up block.
    pub const ALL: [SpeedUpPair; 4] = [
        SpeedUpPair::SeqWithCopyToParWithCopy,
        SpeedUpPair::SeqWithCopyToPar,
        SpeedUpPair::SeqToParWithCopy,
        SpeedUpPair::SeqToPar,
    ];

    /// Position inside the speed-up block.
    pub fn ordinal(self) -> usize {
        self as usize
    }

    /// The slower implementation.
    pub fn baseline(self) -> Variant {
        match self {
            SpeedUpPair::SeqWithCopyToParWithCopy | SpeedUpPair::SeqWithCopyToPar => {
                Variant::SeqWithCopy
            }
            SpeedUpPair::SeqToParWithCopy | SpeedUpPair::SeqToPar => Variant::Seq,
        }
    }

    /// The faster implementation.
    pub fn target(self) -> Variant {
        match self {
            SpeedUpPair::SeqWithCopyToParWithCopy | SpeedUpPair::SeqToParWithCopy => {
                Variant::ParWithCopy
            }
            SpeedUpPair::SeqWithCopyToPar | SpeedUpPair::SeqToPar => Variant::Par,
        }
    }

    /// Row label inside the speed-up block.
    pub fn label(self) -> &'static str {
        match self {
            SpeedUpPair::SeqWithCopyToParWithCopy => "seq_c → par_c",
            SpeedUpPair::SeqWithCopyToPar => "seq_c → par",
            SpeedUpPair::SeqToParWithCopy => "seq → par_c",
            SpeedUpPair::SeqToPar => "seq → par",
        }
    }

    /// Subplot title in the speed-up bar chart.
    pub fn title(self) -> &'static str {
        match self {
            SpeedUpPair::SeqWithCopyToParWithCopy => {
                "Sequential with copy to parallel with copy SpeedUp"
            }
            SpeedUpPair::SeqWithCopyToPar => "Sequential with copy to parallel SpeedUp",
            SpeedUpPair::SeqToParWithCopy => "Sequential to parallel with copy SpeedUp",
            SpeedUpPair::SeqToPar => "Sequential to parallel SpeedUp",
        }
    }
}

impl fmt::Display for SpeedUpPair {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}→{}", self.baseline(), self.target())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordinals_follow_table_order() {
        for (i, v) in Variant::ALL.iter().enumerate() {
            assert_eq!(v.ordinal(), i);
        }
        for (i, p) in SpeedUpPair::ALL.iter().enumerate() {
            assert_eq!(p.ordinal(), i);
        }
    }

    #[test]
    fn pairs_go_from_sequential_to_parallel() {
        let pairs = SpeedUpPair::ALL
            .iter()
            .map(|p| (p.baseline(), p.target()))
            .collect::<Vec<_>>();
        assert_eq!(
            pairs,
            vec![
                (Variant::SeqWithCopy, Variant::ParWithCopy),
                (Variant::SeqWithCopy, Variant::Par),
                (Variant::Seq, Variant::ParWithCopy),
                (Variant::Seq, Variant::Par),
            ]
        );
        assert_eq!(SpeedUpPair::SeqToPar.to_string(), "seq→par");
    }

    #[test]
    fn sample_files_are_classified_longest_prefix_first() {
        assert_eq!(Variant::from_sample_file("cpu_seq_c_exec.csv"), Some(Variant::SeqWithCopy));
        assert_eq!(Variant::from_sample_file("cpu_seq_exec.csv"), Some(Variant::Seq));
        assert_eq!(Variant::from_sample_file("gpu_par_c_exec.csv"), Some(Variant::ParWithCopy));
        assert_eq!(Variant::from_sample_file("gpu_par_exec.csv"), Some(Variant::Par));
        assert_eq!(Variant::from_sample_file("notes.txt"), None);
    }

    #[test]
    fn ids() {
        assert!(Variant::Seq.accepts_id(""));
        assert!(Variant::Seq.accepts_id("seq"));
        assert!(Variant::Seq.accepts_id("cpu_seq_exec"));
        assert!(!Variant::Seq.accepts_id("cpu_seq_c_exec"));
    }
}
