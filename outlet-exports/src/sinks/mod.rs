//! Sink implementations for exports persistence

mod local;
mod stdout;

pub use local::LocalSink;
pub use stdout::StdoutSink;

use crate::sink::{ExportsSink, SinkConfig, SinkError, SinkResult};

/// Create a sink from configuration
///
/// This function dispatches to the appropriate sink implementation based on
/// the sink_type in the configuration.
pub fn create_sink(config: &SinkConfig) -> SinkResult<Box<dyn ExportsSink>> {
    match config.sink_type.as_str() {
        "local" => {
            let sink = LocalSink::from_config(config)?;
            Ok(Box::new(sink))
        }
        "stdout" => Ok(Box::new(StdoutSink::new())),
        // Future sinks:
        // "s3" => Ok(Box::new(S3Sink::from_config(config)?)),
        // "http" => Ok(Box::new(HttpSink::from_config(config)?)),
        other => Err(SinkError::unsupported_sink(other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_unsupported_sink() {
        let config = SinkConfig {
            sink_type: "unsupported".to_string(),
            attributes: HashMap::new(),
        };

        let result = create_sink(&config);
        assert!(result.is_err());

        if let Err(SinkError::UnsupportedSink(name)) = result {
            assert_eq!(name, "unsupported");
        } else {
            panic!("Expected UnsupportedSink error");
        }
    }

    #[test]
    fn test_create_local_sink() {
        let config = SinkConfig {
            sink_type: "local".to_string(),
            attributes: HashMap::new(),
        };

        assert!(create_sink(&config).is_ok());
    }
}
