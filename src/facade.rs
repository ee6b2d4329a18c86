//! Unified facade combining a CFI session and an SHI session behind one
//! object, plus version determination (spec.md §4.7). Ground truth:
//! `examples/original_source/luxtronik/__init__.py` (`Luxtronik`) and
//! `luxtronik/shi/interface.py` (`LuxtronikSmartHomeInterface`) — both
//! collapse into one type here since both transports share the same
//! per-host lock and the same version-filtered schema.

use tracing::debug;

use crate::cfi::{CfiData, CfiSession};
use crate::config::{ConnectionConfig, VersionSelector};
use crate::definitions::RegisterClass;
use crate::shi::ShiSession;
use crate::vector::DataVector;
use crate::version::Version;

/// A facade bound to one host, holding one CFI session and one SHI
/// session. Both sessions serialize against the same process-wide host
/// lock (spec.md §5), so interleaving `read`/`write` calls from the CFI
/// and SHI sides of the same controller never race on the wire.
pub struct Luxtronik {
    cfi: CfiSession,
    shi: ShiSession,
    version: Option<Version>,
    safe: bool,
}

impl Luxtronik {
    /// Resolve the controller's version per `config.version`, then build
    /// both transport sessions (spec.md §4.7). A `Detect` selector probes
    /// the device over the wire; every other selector resolves without
    /// I/O.
    pub async fn connect(config: &ConnectionConfig) -> Luxtronik {
        let cfi = CfiSession::new(config.host.clone(), config.cfi_port);
        let shi = ShiSession::new(config.host.clone(), config.shi_port).with_timeout(config.modbus_timeout());
        let version = match &config.version {
            VersionSelector::Detect => Self::detect(&cfi, &shi).await,
            other => other.resolve_static(),
        };
        debug!(host = config.host.as_str(), ?version, "luxtronik facade resolved controller version");
        Luxtronik { cfi, shi, version, safe: config.safe }
    }

    /// Probe each known version-field definition in turn: read it raw,
    /// run the codec, try to parse the result; return the first that
    /// yields a non-null version (spec.md §4.7 `"detect"`). Both known
    /// version fields are tried in trial-and-error mode so the probe
    /// doesn't itself depend on already knowing the version.
    async fn detect(cfi: &CfiSession, shi: &ShiSession) -> Option<Version> {
        let mut inputs = DataVector::new(RegisterClass::Input, None, true);
        if shi.read_inputs(&mut inputs).await {
            if let Some(field) = inputs.get("version") {
                if let Some(crate::datatypes::Value::FullVersion(s)) = field.value() {
                    if let Some(v) = Version::parse(&s) {
                        return Some(v);
                    }
                }
            }
        }

        let mut data = CfiData::new(None, true);
        if cfi.read_calculations(&mut data.calculations).await {
            if let Some(s) = data.firmware_version() {
                if let Some(v) = Version::parse(&s) {
                    return Some(v);
                }
            }
        }

        None
    }

    /// Construct a facade from already-resolved parts, bypassing version
    /// detection entirely (e.g. for tests, or a caller that already knows
    /// the controller's firmware version).
    pub fn new(host: impl Into<String>, cfi_port: u16, shi_port: u16, version: Option<Version>, safe: bool) -> Luxtronik {
        let host = host.into();
        Luxtronik {
            cfi: CfiSession::new(host.clone(), cfi_port),
            shi: ShiSession::new(host, shi_port),
            version,
            safe,
        }
    }

    pub fn host(&self) -> &str {
        self.cfi.host()
    }

    pub fn version(&self) -> Option<Version> {
        self.version
    }

    pub fn safe(&self) -> bool {
        self.safe
    }

    pub fn new_vector(&self, class: RegisterClass) -> DataVector {
        DataVector::new(class, self.version, self.safe)
    }

    pub fn new_parameters(&self) -> DataVector {
        self.new_vector(RegisterClass::Parameter)
    }

    pub fn new_calculations(&self) -> DataVector {
        self.new_vector(RegisterClass::Calculation)
    }

    pub fn new_visibilities(&self) -> DataVector {
        self.new_vector(RegisterClass::Visibility)
    }

    pub fn new_holdings(&self) -> DataVector {
        self.new_vector(RegisterClass::Holding)
    }

    pub fn new_inputs(&self) -> DataVector {
        self.new_vector(RegisterClass::Input)
    }

    /// Read `vector` over whichever transport owns its register class
    /// (spec.md §4.7 "Read/write methods at the facade level dispatch to
    /// the appropriate session based on the class of the data vector
    /// presented").
    pub async fn read(&self, vector: &mut DataVector) -> bool {
        match vector.class() {
            RegisterClass::Parameter => self.cfi.read_parameters(vector).await,
            RegisterClass::Calculation => self.cfi.read_calculations(vector).await,
            RegisterClass::Visibility => self.cfi.read_visibilities(vector).await,
            RegisterClass::Holding => self.shi.read_holdings(vector).await,
            RegisterClass::Input => self.shi.read_inputs(vector).await,
        }
    }

    /// Write `vector`'s pending entries over whichever transport owns its
    /// register class. Only parameters (CFI) and holdings (SHI) are ever
    /// writable classes; calculations/visibilities/inputs are read-only
    /// and always report failure here.
    pub async fn write(&self, vector: &mut DataVector) -> bool {
        match vector.class() {
            RegisterClass::Parameter => self.cfi.write(vector).await,
            RegisterClass::Holding => self.shi.write_holdings(vector).await,
            RegisterClass::Calculation | RegisterClass::Visibility | RegisterClass::Input => false,
        }
    }

    /// Write-then-read-back `parameters` in one CFI round trip (spec.md
    /// §2 "Supplemented features").
    pub async fn write_and_read_parameters(&self, parameters: &mut DataVector, data: &mut CfiData) -> bool {
        self.cfi.write_and_read(parameters, data).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_and_latest_version_resolve_without_io() {
        let facade = Luxtronik::new("192.0.2.1", crate::cfi::DEFAULT_PORT, crate::shi::DEFAULT_PORT, Some(crate::version::LATEST_VERSION), true);
        assert_eq!(facade.version(), Some(crate::version::LATEST_VERSION));
    }

    #[test]
    fn trial_and_error_facade_has_no_version() {
        let facade = Luxtronik::new("192.0.2.1", crate::cfi::DEFAULT_PORT, crate::shi::DEFAULT_PORT, None, true);
        assert_eq!(facade.version(), None);
        let mut vector = facade.new_holdings();
        assert!(vector.get("4").is_some());
    }

    #[tokio::test]
    async fn write_dispatch_refuses_read_only_classes_without_touching_the_wire() {
        let facade = Luxtronik::new("192.0.2.1", crate::cfi::DEFAULT_PORT, crate::shi::DEFAULT_PORT, Some(crate::version::LATEST_VERSION), true);
        for class in [RegisterClass::Calculation, RegisterClass::Visibility, RegisterClass::Input] {
            let mut vector = facade.new_vector(class);
            assert!(!facade.write(&mut vector).await);
        }
    }
}
