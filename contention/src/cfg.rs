/// Runs two workers that each append 1000 × 2 random values into two shared containers and
/// reports how the chosen synchronization discipline copes.
#[derive(Debug, Clone, clap::Parser)]
pub struct Cfg {
    /// The discipline to run. Runs all of them one after another when omitted.
    #[arg(value_enum)]
    pub variant: Option<Variant>,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    strum::EnumString,
    strum::Display,
    strum::EnumIter,
    clap::ValueEnum,
)]
#[strum(serialize_all = "kebab-case")]
pub enum Variant {
    #[strum(ascii_case_insensitive)]
    Unsynchronized,
    #[strum(ascii_case_insensitive)]
    Coarse,
    #[strum(ascii_case_insensitive)]
    Fine,
    #[strum(ascii_case_insensitive)]
    LockFree,
}
