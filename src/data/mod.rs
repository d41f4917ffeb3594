/// Data layer: record type, loading, and queries.
///
/// Architecture:
/// ```text
///   brickset.json
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse JSON array → Repository<LegoSet>
///   └──────────┘
///        │
///        ▼
///   ┌────────────┐
///   │ Repository │  Vec<LegoSet>, read-only after load
///   └────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  query    │  any / flatten / sum / group over &[LegoSet]
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
pub mod query;
