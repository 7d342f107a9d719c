//! Structured logging.
//!
//! Every line is written as `[<ISO timestamp>][<server id>] <message>`,
//! followed by any structured fields as `key=value`.

use std::fmt;

use tracing::{Event, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::lifecycle::identity::iso_timestamp;

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "diagnostic_server=info,tower_http=info";

/// Event formatter prefixing each line with the time and server id.
#[derive(Debug, Clone)]
pub struct ServerLogFormat {
    server_id: String,
}

impl ServerLogFormat {
    pub fn new(server_id: impl Into<String>) -> Self {
        Self {
            server_id: server_id.into(),
        }
    }
}

impl<S, N> FormatEvent<S, N> for ServerLogFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        write!(writer, "[{}][{}] ", iso_timestamp(), self.server_id)?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Install the global subscriber writing to stdout.
///
/// A second call is a no-op.
pub fn init(server_id: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into());

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(ServerLogFormat::new(server_id))
                .with_writer(std::io::stdout),
        )
        .try_init();
}
