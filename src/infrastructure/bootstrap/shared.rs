//! Helpers shared by the module initializers.

use crate::domain::record::RecordBuilder;
use crate::port::outbound::logger::Logger;

/// Log a warning and keep it on the record.
pub(crate) fn warn(logger: &dyn Logger, record: &mut RecordBuilder, message: impl Into<String>) {
    let message = message.into();
    logger.warn(&message);
    record.warn(message);
}

/// Comma-separated list, or `none`.
pub(crate) fn join_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "none".to_string()
    } else {
        items.join(", ")
    }
}
