//! CFI: the length-prefixed TCP configuration interface (spec.md §4.5,
//! §6). Ground truth: `examples/original_source/luxtronik/cfi/
//! interface.py` (`LuxtronikSocketInterface`) and `luxtronik/cfi/
//! constants.py`.

use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::sleep;
use tracing::{debug, error, info, warn};

use crate::definitions::RegisterClass;
use crate::vector::DataVector;

/// Default CFI port (spec.md §6).
pub const DEFAULT_PORT: u16 = 8889;

/// Settle time after the final write of a batch, before any read
/// (spec.md §4.5, §9 "Post-write settle time" — fixed, not tunable).
pub const WAIT_AFTER_WRITE: Duration = Duration::from_secs(1);

const READ_PARAMETERS: i32 = 3003;
const READ_CALCULATIONS: i32 = 3004;
const READ_VISIBILITIES: i32 = 3005;
const WRITE_PARAMETER: i32 = 3002;

/// Everything the CFI transport returned from one host, bundled the way
/// `examples/original_source/luxtronik/cfi/interface.py`'s `LuxtronikData`
/// groups the three vectors.
pub struct CfiData {
    pub parameters: DataVector,
    pub calculations: DataVector,
    pub visibilities: DataVector,
}

impl CfiData {
    pub fn new(version: Option<crate::version::Version>, safe: bool) -> CfiData {
        CfiData {
            parameters: DataVector::new(RegisterClass::Parameter, version, safe),
            calculations: DataVector::new(RegisterClass::Calculation, version, safe),
            visibilities: DataVector::new(RegisterClass::Visibility, version, safe),
        }
    }

    /// `ID_WEB_SoftStand`'s replacement (spec.md §2 "Supplemented
    /// features"): concatenate the ten ASCII-packed version chunks into a
    /// string.
    pub fn firmware_version(&mut self) -> Option<String> {
        let mut chars = String::new();
        for i in 0..crate::definitions::calculations::FIRMWARE_VERSION_CHUNK_COUNT {
            let idx = crate::definitions::calculations::FIRMWARE_VERSION_FIRST_INDEX + i as i64;
            let field = self.calculations.get(&idx.to_string())?;
            match field.value() {
                Some(crate::datatypes::Value::Character(c)) if c != '\0' => chars.push(c),
                Some(crate::datatypes::Value::Character(_)) => break,
                _ => return None,
            }
        }
        if chars.is_empty() {
            None
        } else {
            Some(chars)
        }
    }
}

/// A session bound to one host. Holds the process-wide host lock for the
/// duration of every `read`/`write` call (spec.md §5).
pub struct CfiSession {
    host: String,
    port: u16,
}

impl CfiSession {
    pub fn new(host: impl Into<String>, port: u16) -> CfiSession {
        CfiSession { host: host.into(), port }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    /// Read parameters, calculations, and visibilities into `data`
    /// (spec.md §4.5 `_read`).
    pub async fn read(&self, data: &mut CfiData) -> bool {
        let lock = crate::hostlock::get_host_lock(&self.host);
        let _guard = lock.lock().await;
        let Some(mut stream) = self.connect().await else {
            return false;
        };
        let ok_p = self.read_parameters_locked(&mut stream, &mut data.parameters).await;
        let ok_c = self.read_calculations_locked(&mut stream, &mut data.calculations).await;
        let ok_v = self.read_visibilities_locked(&mut stream, &mut data.visibilities).await;
        ok_p && ok_c && ok_v
    }

    pub async fn read_parameters(&self, vector: &mut DataVector) -> bool {
        let lock = crate::hostlock::get_host_lock(&self.host);
        let _guard = lock.lock().await;
        let Some(mut stream) = self.connect().await else {
            return false;
        };
        self.read_parameters_locked(&mut stream, vector).await
    }

    pub async fn read_calculations(&self, vector: &mut DataVector) -> bool {
        let lock = crate::hostlock::get_host_lock(&self.host);
        let _guard = lock.lock().await;
        let Some(mut stream) = self.connect().await else {
            return false;
        };
        self.read_calculations_locked(&mut stream, vector).await
    }

    pub async fn read_visibilities(&self, vector: &mut DataVector) -> bool {
        let lock = crate::hostlock::get_host_lock(&self.host);
        let _guard = lock.lock().await;
        let Some(mut stream) = self.connect().await else {
            return false;
        };
        self.read_visibilities_locked(&mut stream, vector).await
    }

    /// Drain `parameters`' write-pending queue one register at a time,
    /// each followed by its ack read, then sleep the settle interval
    /// (spec.md §4.5 `_write`).
    pub async fn write(&self, parameters: &mut DataVector) -> bool {
        let lock = crate::hostlock::get_host_lock(&self.host);
        let _guard = lock.lock().await;
        let Some(mut stream) = self.connect().await else {
            return false;
        };
        self.write_locked(&mut stream, parameters).await
    }

    /// Write-then-read-back in one call (spec.md §2 "Supplemented
    /// features", `write_and_read` from `luxtronik/cfi/interface.py`).
    pub async fn write_and_read(&self, parameters: &mut DataVector, data: &mut CfiData) -> bool {
        let lock = crate::hostlock::get_host_lock(&self.host);
        let _guard = lock.lock().await;
        let Some(mut stream) = self.connect().await else {
            return false;
        };
        let wrote = self.write_locked(&mut stream, parameters).await;
        let ok_p = self.read_parameters_locked(&mut stream, &mut data.parameters).await;
        let ok_c = self.read_calculations_locked(&mut stream, &mut data.calculations).await;
        let ok_v = self.read_visibilities_locked(&mut stream, &mut data.visibilities).await;
        wrote && ok_p && ok_c && ok_v
    }

    async fn connect(&self) -> Option<TcpStream> {
        match TcpStream::connect((self.host.as_str(), self.port)).await {
            Ok(stream) => {
                info!(host = self.host.as_str(), port = self.port, "connected to Luxtronik heat pump");
                Some(stream)
            }
            Err(err) => {
                error!(host = self.host.as_str(), port = self.port, error = %err, "failed to connect to Luxtronik heat pump");
                None
            }
        }
    }

    async fn read_parameters_locked(&self, stream: &mut TcpStream, parameters: &mut DataVector) -> bool {
        if send_ints(stream, &[READ_PARAMETERS, 0]).await.is_err() {
            return false;
        }
        let Ok(cmd) = read_int(stream).await else { return false };
        debug!(host = self.host.as_str(), cmd, "command echoed");
        let Ok(length) = read_int(stream).await else { return false };
        let mut data = Vec::with_capacity(length.max(0) as usize);
        for _ in 0..length.max(0) {
            match read_int(stream).await {
                Ok(v) => data.push(v as i64),
                Err(_) => return false,
            }
        }
        info!(host = self.host.as_str(), count = length, "read parameters");
        parameters.parse(&data);
        true
    }

    async fn read_calculations_locked(&self, stream: &mut TcpStream, calculations: &mut DataVector) -> bool {
        if send_ints(stream, &[READ_CALCULATIONS, 0]).await.is_err() {
            return false;
        }
        let Ok(cmd) = read_int(stream).await else { return false };
        debug!(host = self.host.as_str(), cmd, "command echoed");
        let Ok(_status) = read_int(stream).await else { return false };
        let Ok(length) = read_int(stream).await else { return false };
        let mut data = Vec::with_capacity(length.max(0) as usize);
        for _ in 0..length.max(0) {
            match read_int(stream).await {
                Ok(v) => data.push(v as i64),
                Err(_) => return false,
            }
        }
        info!(host = self.host.as_str(), count = length, "read calculations");
        calculations.parse(&data);
        true
    }

    async fn read_visibilities_locked(&self, stream: &mut TcpStream, visibilities: &mut DataVector) -> bool {
        if send_ints(stream, &[READ_VISIBILITIES, 0]).await.is_err() {
            return false;
        }
        let Ok(cmd) = read_int(stream).await else { return false };
        debug!(host = self.host.as_str(), cmd, "command echoed");
        let Ok(length) = read_int(stream).await else { return false };
        let mut data = Vec::with_capacity(length.max(0) as usize);
        for _ in 0..length.max(0) {
            match read_char(stream).await {
                Ok(v) => data.push(v as i64),
                Err(_) => return false,
            }
        }
        info!(host = self.host.as_str(), count = length, "read visibilities");
        visibilities.parse(&data);
        true
    }

    async fn write_locked(&self, stream: &mut TcpStream, parameters: &mut DataVector) -> bool {
        let pending = parameters.pending_single_writes();
        let mut all_ok = true;
        for (index, value) in pending {
            let (Ok(index32), Ok(value32)) = (i32::try_from(index), i32::try_from(value)) else {
                warn!(host = self.host.as_str(), index, value, "parameter index or value invalid; skipping");
                all_ok = false;
                continue;
            };
            info!(host = self.host.as_str(), index, value, "writing parameter");
            if send_ints(stream, &[WRITE_PARAMETER, index32, value32]).await.is_err() {
                all_ok = false;
                continue;
            }
            let Ok(cmd) = read_int(stream).await else {
                all_ok = false;
                continue;
            };
            let Ok(acked_index) = read_int(stream).await else {
                all_ok = false;
                continue;
            };
            debug!(host = self.host.as_str(), cmd, acked_index, "write acknowledged");
            parameters.clear_write_pending_by_index(index);
        }
        sleep(WAIT_AFTER_WRITE).await;
        all_ok
    }
}

async fn send_ints(stream: &mut TcpStream, values: &[i32]) -> std::io::Result<()> {
    let mut buf = Vec::with_capacity(values.len() * 4);
    for v in values {
        buf.extend_from_slice(&v.to_be_bytes());
    }
    stream.write_all(&buf).await
}

async fn read_bytes(stream: &mut TcpStream, count: usize) -> std::io::Result<Vec<u8>> {
    let mut buf = vec![0u8; count];
    let mut filled = 0;
    while filled < count {
        let n = stream.read(&mut buf[filled..]).await?;
        if n == 0 {
            return Err(std::io::Error::new(std::io::ErrorKind::ConnectionAborted, "connection died"));
        }
        filled += n;
    }
    Ok(buf)
}

async fn read_int(stream: &mut TcpStream) -> std::io::Result<i32> {
    let bytes = read_bytes(stream, 4).await?;
    Ok(i32::from_be_bytes(bytes.try_into().unwrap()))
}

async fn read_char(stream: &mut TcpStream) -> std::io::Result<i8> {
    let bytes = read_bytes(stream, 1).await?;
    Ok(bytes[0] as i8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::net::TcpListener;

    #[tokio::test]
    async fn reads_parameters_from_a_fake_server() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let server = tokio::spawn(async move {
            let (mut sock, _) = listener.accept().await.unwrap();
            let mut req = [0u8; 8];
            sock.read_exact(&mut req).await.unwrap();
            assert_eq!(i32::from_be_bytes(req[0..4].try_into().unwrap()), READ_PARAMETERS);
            let mut resp = Vec::new();
            for v in [READ_PARAMETERS, 3, 17, 42, 0x7FFF] {
                resp.extend_from_slice(&v.to_be_bytes());
            }
            sock.write_all(&resp).await.unwrap();
        });

        let session = CfiSession::new(addr.ip().to_string(), addr.port());
        let mut parameters = DataVector::new(RegisterClass::Parameter, Some(crate::version::LATEST_VERSION), true);
        let ok = session.read_parameters(&mut parameters).await;
        assert!(ok);
        server.await.unwrap();
        assert_eq!(parameters.definition("1").unwrap().index, 1);
        assert_eq!(parameters.get("1").unwrap().value(), Some(crate::datatypes::Value::Number(4.2)));
    }

    #[tokio::test]
    async fn short_read_is_treated_as_connection_death() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let server = tokio::spawn(async move {
            let (mut sock, _) = listener.accept().await.unwrap();
            let mut req = [0u8; 8];
            sock.read_exact(&mut req).await.unwrap();
            sock.write_all(&READ_PARAMETERS.to_be_bytes()).await.unwrap();
            // Drop the connection before sending the length field.
        });

        let session = CfiSession::new(addr.ip().to_string(), addr.port());
        let mut parameters = DataVector::new(RegisterClass::Parameter, Some(crate::version::LATEST_VERSION), true);
        let ok = session.read_parameters(&mut parameters).await;
        assert!(!ok);
        server.await.unwrap();
    }
}
