//! The facade dispatches `read`/`write` to CFI or SHI purely by the
//! register class of the presented `DataVector` (spec.md §4.7). Driven
//! against a fake CFI server since `tokio-modbus` has no in-process fake
//! transport (see `src/shi/mod.rs`'s test module).

use luxtronik::version::LATEST_VERSION;
use luxtronik::Luxtronik;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

const READ_PARAMETERS: i32 = 3003;

#[tokio::test]
async fn facade_read_routes_parameters_through_cfi() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let server = tokio::spawn(async move {
        let (mut sock, _) = listener.accept().await.unwrap();
        let mut req = [0u8; 8];
        sock.read_exact(&mut req).await.unwrap();
        assert_eq!(i32::from_be_bytes(req[0..4].try_into().unwrap()), READ_PARAMETERS);
        let mut resp = Vec::new();
        for v in [READ_PARAMETERS, 2, 99, 70] {
            resp.extend_from_slice(&v.to_be_bytes());
        }
        sock.write_all(&resp).await.unwrap();
    });

    let facade = Luxtronik::new(addr.ip().to_string(), addr.port(), 502, Some(LATEST_VERSION), true);
    let mut parameters = facade.new_parameters();
    let ok = facade.read(&mut parameters).await;
    assert!(ok);
    assert_eq!(parameters.definition("1").unwrap().index, 1);
    assert_eq!(parameters.get("1").unwrap().value(), Some(luxtronik::datatypes::Value::Number(7.0)));

    server.await.unwrap();
}
