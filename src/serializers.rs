//! Record binding module: entity sources, serializer metadata, serializers.

pub use remould_serializers::*;
