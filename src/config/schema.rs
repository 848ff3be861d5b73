use serde_json::{json, Value};
use std::sync::LazyLock;

pub static CONFIG_SCHEMA: LazyLock<Value> = LazyLock::new(|| {
    json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "type": "object",
        "additionalProperties": false,
        "properties": {
            "input": {
                "type": "object",
                "properties": {
                    "delimiter": { "type": "string", "minLength": 1, "maxLength": 1 }
                }
            },
            "columns": {
                "type": "object",
                "additionalProperties": false,
                "properties": {
                    "exploitation": { "$ref": "#/$defs/headers" },
                    "mission_impact": { "$ref": "#/$defs/headers" },
                    "automatable": { "$ref": "#/$defs/headers" },
                    "technical_impact": { "$ref": "#/$defs/headers" },
                    "cvss_vector": { "$ref": "#/$defs/headers" }
                }
            },
            "codes": {
                "type": "object",
                "additionalProperties": false,
                "properties": {
                    "exploitation": {
                        "type": "object",
                        "additionalProperties": { "type": "string", "enum": ["none", "poc", "active"] }
                    },
                    "mission_impact": {
                        "type": "object",
                        "additionalProperties": { "type": "string", "enum": ["low", "medium", "high"] }
                    }
                }
            },
            "decision": {
                "type": "object",
                "properties": {
                    "technical_impact_rule": { "type": "string", "enum": ["any_high", "all_high"] }
                }
            },
            "output": {
                "type": "object",
                "properties": {
                    "delimiter": { "type": "string", "minLength": 1, "maxLength": 1 },
                    "format": { "type": "string", "enum": ["csv", "json"] },
                    "bom": { "type": "boolean" },
                    "suffix": { "type": "string", "minLength": 1 }
                }
            },
            "batch": {
                "type": "object",
                "properties": {
                    "workers": { "type": "integer", "minimum": 1 }
                }
            }
        },
        "$defs": {
            "headers": {
                "type": "array",
                "items": { "type": "string", "minLength": 1 }
            }
        }
    })
});
