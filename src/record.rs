//! Key/value event records: the textual shape the pipeline's motivating
//! workload converts into.
//!
//! A record is a tagged tuple of sender, receiver, timestamp, and an ordered
//! list of key/value attributes, rendered as
//! `event_type[sender,receiver,time,(k1="v1";k2=v2)]`. The pipeline core is
//! generic and never inspects this type; it lives here for the conversion
//! functions, tests, and benches that exercise the pipeline end to end.

use std::fmt;

/// One attribute of an event record.
///
/// `quoted` only affects rendering; equality compares key and value alone.
#[derive(Clone, Debug, Default)]
pub struct KeyValue {
    pub key: String,
    pub value: String,
    pub quoted: bool,
}

impl KeyValue {
    /// Attribute rendered with the value in double quotes.
    pub fn quoted(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            quoted: true,
        }
    }

    /// Attribute rendered with the bare value.
    pub fn bare(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            quoted: false,
        }
    }

    fn append_to(&self, out: &mut String) {
        out.push_str(&self.key);
        out.push('=');
        if self.quoted {
            out.push('"');
            out.push_str(&self.value);
            out.push('"');
        } else {
            out.push_str(&self.value);
        }
    }
}

impl PartialEq for KeyValue {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key && self.value == other.value
    }
}

impl Eq for KeyValue {}

impl fmt::Display for KeyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.quoted {
            write!(f, "{}=\"{}\"", self.key, self.value)
        } else {
            write!(f, "{}={}", self.key, self.value)
        }
    }
}

/// A structured event with an ordered attribute list.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EventRecord {
    pub event_type: String,
    pub sender: String,
    pub receiver: String,
    pub time: String,
    pub pairs: Vec<KeyValue>,
}

impl EventRecord {
    pub fn new(
        event_type: impl Into<String>,
        sender: impl Into<String>,
        receiver: impl Into<String>,
        time: impl Into<String>,
    ) -> Self {
        Self {
            event_type: event_type.into(),
            sender: sender.into(),
            receiver: receiver.into(),
            time: time.into(),
            pairs: Vec::new(),
        }
    }

    /// Render into an existing buffer, appending. Avoids the intermediate
    /// allocation of going through [`fmt::Display`] on hot paths.
    pub fn append_to(&self, out: &mut String) {
        out.push_str(&self.event_type);
        out.push('[');
        out.push_str(&self.sender);
        out.push(',');
        out.push_str(&self.receiver);
        out.push(',');
        out.push_str(&self.time);
        out.push_str(",(");
        let mut first = true;
        for pair in &self.pairs {
            if !first {
                out.push(';');
            }
            first = false;
            pair.append_to(out);
        }
        out.push_str(")]");
    }
}

impl fmt::Display for EventRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{},{},{},(", self.event_type, self.sender, self.receiver, self.time)?;
        let mut first = true;
        for pair in &self.pairs {
            if !first {
                f.write_str(";")?;
            }
            first = false;
            write!(f, "{pair}")?;
        }
        f.write_str(")]")
    }
}
