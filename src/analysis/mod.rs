/// Analysis layer: pure statistics and routing, no UI types.
///
/// ```text
///   Dataset + Classification
///        │
///        ├── describe      summary, value counts, histogram bins
///        ├── density       Gaussian KDE (curve, range probability)
///        ├── correlate     Pearson correlation over paired columns
///        ├── contingency   cross-tabulation, chi-square, Cramér's V
///        └── route         kind tags → which plot to draw
/// ```
pub mod contingency;
pub mod correlate;
pub mod density;
pub mod describe;
pub mod route;
