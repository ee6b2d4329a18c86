//! Wire-level request/response units shared by both transports
//! (spec.md §3).

/// Which Modbus function / CFI command a telegram represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TelegramKind {
    CfiParameters,
    CfiCalculations,
    CfiVisibilities,
    ShiReadHoldings,
    ShiReadInputs,
    ShiWriteHoldings,
}

#[derive(Debug, Clone)]
pub enum Telegram {
    Read {
        kind: TelegramKind,
        address: u32,
        count: u32,
        data: Option<Vec<i64>>,
    },
    Write {
        kind: TelegramKind,
        address: u32,
        payload: Vec<i64>,
        ack: bool,
    },
}

impl Telegram {
    pub fn read(kind: TelegramKind, address: u32, count: u32) -> Telegram {
        Telegram::Read { kind, address, count, data: None }
    }

    pub fn write(kind: TelegramKind, address: u32, payload: Vec<i64>) -> Telegram {
        Telegram::Write { kind, address, payload, ack: false }
    }

    pub fn kind(&self) -> TelegramKind {
        match self {
            Telegram::Read { kind, .. } => *kind,
            Telegram::Write { kind, .. } => *kind,
        }
    }

    pub fn is_write(&self) -> bool {
        matches!(self, Telegram::Write { .. })
    }

    pub fn count(&self) -> u32 {
        match self {
            Telegram::Read { count, .. } => *count,
            Telegram::Write { payload, .. } => payload.len() as u32,
        }
    }

    pub fn address(&self) -> u32 {
        match self {
            Telegram::Read { address, .. } => *address,
            Telegram::Write { address, .. } => *address,
        }
    }

    /// Outcome of a send: for a read, the decoded words; for a write, a
    /// dummy success flag folded into a zero-length `Some`/`None`. Used by
    /// the SHI session to distinguish a failed telegram from one that
    /// simply hasn't been sent yet.
    pub fn into_data(self) -> Option<Vec<i64>> {
        match self {
            Telegram::Read { data, .. } => data,
            Telegram::Write { ack, payload, .. } => ack.then_some(payload),
        }
    }

    pub fn succeeded(&self) -> bool {
        match self {
            Telegram::Read { data, .. } => data.is_some(),
            Telegram::Write { ack, .. } => *ack,
        }
    }

    /// Mark a telegram as having failed during `send`, clearing any
    /// partial read data.
    pub fn failed(self) -> Telegram {
        match self {
            Telegram::Read { kind, address, count, .. } => Telegram::Read { kind, address, count, data: None },
            Telegram::Write { kind, address, payload, .. } => Telegram::Write { kind, address, payload, ack: false },
        }
    }

    /// Fill in a read telegram's result data after a successful dispatch.
    pub fn read_result(template: &Telegram, data: Vec<i64>) -> Telegram {
        let Telegram::Read { kind, address, count, .. } = template else {
            unreachable!("read_result called with a non-read telegram template");
        };
        Telegram::Read { kind: *kind, address: *address, count: *count, data: Some(data) }
    }

    /// Mark a write telegram as acknowledged after a successful dispatch.
    pub fn ack(template: Telegram) -> Telegram {
        match template {
            Telegram::Write { kind, address, payload, .. } => Telegram::Write { kind, address, payload, ack: true },
            read @ Telegram::Read { .. } => read,
        }
    }
}
