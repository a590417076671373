use crate::logging::log_message::LogMessage;
use chrono::{DateTime, Local};
use log::Record;
use log4rs::encode::{Encode, Write};
use serde::Serialize;

/// One json object per line. The console variant leaves out the timestamp.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct JsonEncoder {
    timestamps: bool,
}

impl Default for JsonEncoder {
    fn default() -> Self {
        JsonEncoder { timestamps: true }
    }
}

impl JsonEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn without_timestamps() -> Self {
        JsonEncoder { timestamps: false }
    }

    fn encode_inner(
        &self,
        w: &mut dyn Write,
        time: DateTime<Local>,
        record: &Record,
    ) -> anyhow::Result<()> {
        let message = LogMessage {
            severity: String::from(record.level().as_str()),
            message: record.args().to_string(),
            time: self.timestamps.then(|| time.to_rfc3339()),
        };
        message.serialize(&mut serde_json::Serializer::new(&mut *w))?;
        w.write_all("\n".as_bytes())?;
        Ok(())
    }
}

impl Encode for JsonEncoder {
    fn encode(&self, w: &mut dyn Write, record: &Record) -> anyhow::Result<()> {
        self.encode_inner(w, Local::now(), record)
    }
}
