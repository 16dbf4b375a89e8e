//! Value codec tests

use kvc_domain::error::Error;
use kvc_domain::ports::providers::{JsonCodec, ValueCodec};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Shop {
    id: u64,
    name: String,
}

#[test]
fn test_json_codec_never_produces_the_null_marker() {
    let codec = JsonCodec::new();

    // An empty string value must still encode to a non-empty payload
    let encoded = codec.encode(&String::new()).unwrap();
    assert_eq!(encoded, "\"\"");
    assert!(!encoded.is_empty());

    let shop = Shop {
        id: 1,
        name: "Tea House".to_string(),
    };
    let encoded = codec.encode(&shop).unwrap();
    let decoded: Shop = codec.decode(&encoded).unwrap();
    assert_eq!(decoded, shop);
}

#[test]
fn test_json_codec_rejects_malformed_payload() {
    let codec = JsonCodec::new();
    let result: Result<Shop, Error> = codec.decode("{\"id\": \"not a number\"}");
    assert!(matches!(result, Err(Error::Json { .. })));
    assert_eq!(codec.name(), "json");
}
