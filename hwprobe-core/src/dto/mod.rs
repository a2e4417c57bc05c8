//! Wire DTOs for the diagnostic job services

pub mod job;

pub use job::{
    LaunchEnvelope, LaunchRecord, LaunchStatusResponse, RunEnvelope, RunStatusResponse,
    SubmitRequest, SubmitResponse,
};
