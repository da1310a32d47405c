//! Analysis data handlers.
//!
//! - `AnalysisDataStore` - get/update against object storage for one layout
//! - `InvocationDispatcher` - maps managed-API events onto the store

mod dispatcher;
mod invocation;
mod store;

pub use dispatcher::{dispatcher_for, InvocationDispatcher, InvocationError, InvocationHandler};
pub use invocation::{
    InvocationArguments, InvocationEvent, InvocationInfo, InvocationOutcome, Operation,
    GET_ANALYSIS_DATA, UPDATE_ANALYSIS_DATA,
};
pub use store::AnalysisDataStore;
