pub mod types;

pub use types::{
    children_of, clauses_of_type, Clause, ClauseType, ContractDocument, ParseClauseTypeError,
    SegmentationReport, SegmentationStats,
};
