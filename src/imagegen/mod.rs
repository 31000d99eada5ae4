// Image generation — thin client for the Kie.ai task API.
//
// The provider is asynchronous: a createTask call returns an opaque task
// id, and callers poll taskStatus until an image URL shows up. We proxy
// both operations and never store provider state.

pub mod catalog;
pub mod client;
