//! Test fixture for GraphCore integration tests
//!
//! Seeds a schema with a handful of property keys and one edge label, and a
//! vertex set with ids 1 through 5.

#![allow(dead_code)]

use graphcore::{
    DataType, InMemoryVertices, SchemaRegistry, VertexCentricQueryBuilder, VertexRef,
};
use std::sync::Arc;

pub struct TestFixture {
    schema: Arc<SchemaRegistry>,
    vertices: Arc<InMemoryVertices>,
}

impl TestFixture {
    /// Create a fixture with the default schema and vertices
    pub fn new() -> Self {
        let _ = env_logger::builder().is_test(true).try_init();

        let schema = SchemaRegistry::new();
        schema
            .make_property_key("age", DataType::Integer)
            .expect("Failed to define age");
        schema
            .make_property_key("name", DataType::String)
            .expect("Failed to define name");
        schema
            .make_property_key("weight", DataType::Float)
            .expect("Failed to define weight");
        schema
            .make_property_key("blob", DataType::Object)
            .expect("Failed to define blob");
        schema
            .make_edge_label("knows")
            .expect("Failed to define knows");

        Self {
            schema: Arc::new(schema),
            vertices: Arc::new(InMemoryVertices::with_ids(1..=5)),
        }
    }

    pub fn schema(&self) -> &Arc<SchemaRegistry> {
        &self.schema
    }

    pub fn vertices(&self) -> &Arc<InMemoryVertices> {
        &self.vertices
    }

    pub fn vertex(&self, id: u64) -> VertexRef {
        VertexRef::new(id)
    }

    /// Fresh builder over the fixture schema and vertices
    pub fn builder(&self) -> VertexCentricQueryBuilder {
        VertexCentricQueryBuilder::new(self.schema.clone(), self.vertices.clone())
    }
}
