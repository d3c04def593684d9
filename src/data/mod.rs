/// Data layer: the two record types and the loaders that produce them.
///
/// Architecture:
/// ```text
///  neos.csv              cad.json
///      │                     │
///      ▼                     ▼
///  ┌───────────┐      ┌─────────────────┐
///  │ load_neos │      │ load_approaches │   parse file → Vec<record>
///  └───────────┘      └─────────────────┘
///      │                     │
///      ▼                     ▼
///  Vec<NearEarthObject>  Vec<CloseApproach>
///           (joined downstream on `designation`)
/// ```
///
/// The loaders are independent leaf functions; neither consumes the
/// other's output, and repeated calls share no state.
pub mod loader;
pub mod model;
