//! Chunk-source handles and the registry that hands them out.
//!
//! A chunk source is identified by its parameter record type (through
//! [`ChunkSourceParameters::RPC_ID`]) together with the specification and
//! parameter values. The [`ChunkManager`] returns the same shared handle for
//! identical requests, so consumers can compare sources by pointer.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use dashmap::DashMap;

/// A fixed, named parameter record describing how to fetch chunks.
///
/// The associated `RPC_ID` names the record type for remote dispatch and is
/// part of the registry key.
pub trait ChunkSourceParameters: fmt::Debug + Clone + Send + Sync + 'static {
    /// Dispatch identifier of this parameter record type.
    const RPC_ID: &'static str;

    /// Geometry record accompanying the parameters.
    type Spec: fmt::Debug + Clone + Send + Sync + 'static;
}

/// A chunk source: its geometry plus the parameters needed to fetch chunks.
#[derive(Debug, Clone, PartialEq)]
pub struct ChunkSource<P: ChunkSourceParameters> {
    pub spec: P::Spec,
    pub parameters: P,
}

impl<P: ChunkSourceParameters> ChunkSource<P> {
    /// Dispatch identifier of the parameter record.
    pub fn rpc_id(&self) -> &'static str {
        P::RPC_ID
    }
}

/// Registry of chunk sources, deduplicated by type, spec and parameters.
#[derive(Default)]
pub struct ChunkManager {
    sources: DashMap<String, Arc<dyn Any + Send + Sync>>,
}

impl ChunkManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the shared chunk source for `spec` and `parameters`, creating
    /// it on first request.
    pub fn get_chunk_source<P: ChunkSourceParameters>(
        &self,
        spec: P::Spec,
        parameters: P,
    ) -> Arc<ChunkSource<P>> {
        let key = format!("{}:{:?}:{:?}", P::RPC_ID, spec, parameters);
        let entry = self
            .sources
            .entry(key)
            .or_insert_with(|| {
                Arc::new(ChunkSource {
                    spec: spec.clone(),
                    parameters: parameters.clone(),
                }) as Arc<dyn Any + Send + Sync>
            })
            .value()
            .clone();

        // Two record types sharing an RPC id and debug form would collide
        // here; hand out an unshared source rather than the wrong type.
        entry
            .downcast::<ChunkSource<P>>()
            .unwrap_or_else(|_| Arc::new(ChunkSource { spec, parameters }))
    }

    /// Number of distinct sources handed out so far.
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}
