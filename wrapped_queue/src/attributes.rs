//! Message attribute encode/decode rules
//!
//! SQS transmits message attributes as (data type, string value) pairs. This
//! module maps them to and from the flat string-or-number form exposed to
//! callers. Only the `String` and `Number` data types are supported; anything
//! else is a coercion error, on either side.

use std::collections::HashMap;

use aws_sdk_sqs::types::{
    MessageAttributeValue, MessageSystemAttributeNameForSends, MessageSystemAttributeValue,
};

use crate::error::{QueueError, QueueResult};
use crate::types::{AttributeValue, DecodedMessageAttributes};

const DATA_TYPE_STRING: &str = "String";
const DATA_TYPE_NUMBER: &str = "Number";

/// Encodes message attributes into the SQS wire form
///
/// # Errors
///
/// Returns `QueueError::RequestBuild` if the SDK rejects an attribute value
pub fn encode_message_attributes(
    attributes: &DecodedMessageAttributes,
) -> QueueResult<HashMap<String, MessageAttributeValue>> {
    attributes
        .iter()
        .map(|(name, value)| {
            let encoded = MessageAttributeValue::builder()
                .data_type(value.data_type())
                .string_value(value.wire_value())
                .build()?;
            Ok((name.clone(), encoded))
        })
        .collect()
}

/// Decodes message attributes from the SQS wire form
///
/// # Errors
///
/// Returns `QueueError::UnsupportedAttributeType` for a data type other than
/// `String` or `Number`, and `QueueError::MalformedAttribute` for a `Number`
/// whose wire value does not parse
pub fn decode_message_attributes(
    attributes: &HashMap<String, MessageAttributeValue>,
) -> QueueResult<DecodedMessageAttributes> {
    attributes
        .iter()
        .map(|(name, value)| {
            let decoded = match value.data_type() {
                DATA_TYPE_STRING => {
                    AttributeValue::String(value.string_value().unwrap_or_default().to_string())
                }
                DATA_TYPE_NUMBER => {
                    let raw = value.string_value().unwrap_or_default();
                    let number = raw.parse::<f64>().map_err(|_| {
                        QueueError::MalformedAttribute {
                            name: name.clone(),
                            value: raw.to_string(),
                        }
                    })?;
                    AttributeValue::Number(number)
                }
                other => return Err(QueueError::UnsupportedAttributeType(other.to_string())),
            };
            Ok((name.clone(), decoded))
        })
        .collect()
}

/// Encodes system attributes for a send
///
/// Keys are passed through to the service's system attribute name set;
/// `AWSTraceHeader` is the only name the service currently accepts.
///
/// # Errors
///
/// Returns `QueueError::RequestBuild` if the SDK rejects an attribute value
pub fn encode_system_attributes(
    attributes: &DecodedMessageAttributes,
) -> QueueResult<HashMap<MessageSystemAttributeNameForSends, MessageSystemAttributeValue>> {
    attributes
        .iter()
        .map(|(name, value)| {
            let encoded = MessageSystemAttributeValue::builder()
                .data_type(value.data_type())
                .string_value(value.wire_value())
                .build()?;
            Ok((
                MessageSystemAttributeNameForSends::from(name.as_str()),
                encoded,
            ))
        })
        .collect()
}
