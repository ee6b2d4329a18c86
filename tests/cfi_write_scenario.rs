//! End-to-end CFI parameter write, matching spec.md §8 scenario 2: the
//! caller sets a Celsius-scaled parameter, the write cycle issues
//! `WRITE_PARAMETER`, the server acks, the queue empties, and the client
//! settles for `WAIT_AFTER_WRITE` before returning (no read follows).

use std::time::Instant;

use luxtronik::cfi::{CfiSession, WAIT_AFTER_WRITE};
use luxtronik::datatypes::Value;
use luxtronik::version::LATEST_VERSION;
use luxtronik::{DataVector, RegisterClass};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

const WRITE_PARAMETER: i32 = 3002;

#[tokio::test]
async fn write_cycle_sets_register_104_to_200_and_settles() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let server = tokio::spawn(async move {
        let (mut sock, _) = listener.accept().await.unwrap();
        let mut req = [0u8; 12];
        sock.read_exact(&mut req).await.unwrap();
        let cmd = i32::from_be_bytes(req[0..4].try_into().unwrap());
        let index = i32::from_be_bytes(req[4..8].try_into().unwrap());
        let value = i32::from_be_bytes(req[8..12].try_into().unwrap());
        assert_eq!(cmd, WRITE_PARAMETER);
        assert_eq!(index, 104);
        assert_eq!(value, 200);

        let mut resp = Vec::new();
        resp.extend_from_slice(&WRITE_PARAMETER.to_be_bytes());
        resp.extend_from_slice(&index.to_be_bytes());
        sock.write_all(&resp).await.unwrap();
    });

    let mut parameters = DataVector::new(RegisterClass::Parameter, Some(LATEST_VERSION), true);
    assert!(parameters.set("104", &Value::Number(20.0)));
    assert!(parameters.get("104").unwrap().write_pending());

    let session = CfiSession::new(addr.ip().to_string(), addr.port());
    let started = Instant::now();
    let ok = session.write(&mut parameters).await;
    let elapsed = started.elapsed();

    assert!(ok);
    assert!(!parameters.get("104").unwrap().write_pending(), "queue should be empty after ack");
    assert!(elapsed >= WAIT_AFTER_WRITE, "client must settle {:?} after the final write", WAIT_AFTER_WRITE);

    server.await.unwrap();
}
