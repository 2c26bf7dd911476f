//! GET through the real TLS dialer against a rustls server on loopback.

mod helpers;

use std::io::{Read, Write};
use std::net::{Ipv4Addr, TcpListener};
use std::sync::Arc;
use std::thread;

use helpers::FixedResolver;
use muslimkit::config::ClientSettings;
use muslimkit::net::TlsDialer;
use muslimkit::HttpClient;
use rustls::crypto::ring::default_provider;
use rustls::pki_types::{CertificateDer, PrivatePkcs8KeyDer};
use rustls::{ClientConfig, RootCertStore, ServerConfig, ServerConnection, StreamOwned};

fn localhost_configs() -> (Arc<ServerConfig>, Arc<ClientConfig>) {
    let cert = rcgen::generate_simple_self_signed(vec!["localhost".to_string()]).unwrap();
    let key = PrivatePkcs8KeyDer::from(cert.key_pair.serialize_der());
    let cert_der = CertificateDer::from(cert.cert);

    let mut server = ServerConfig::builder_with_provider(Arc::new(default_provider()))
        .with_safe_default_protocol_versions()
        .unwrap()
        .with_no_client_auth()
        .with_single_cert(vec![cert_der.clone()], key.into())
        .unwrap();
    server.send_tls13_tickets = 0;

    let mut roots = RootCertStore::empty();
    roots.add(cert_der).unwrap();
    let client = ClientConfig::builder_with_provider(Arc::new(default_provider()))
        .with_safe_default_protocol_versions()
        .unwrap()
        .with_root_certificates(roots)
        .with_no_client_auth();

    (Arc::new(server), Arc::new(client))
}

#[test]
fn test_chunked_get_over_tls() {
    let (server_cfg, client_cfg) = localhost_configs();
    let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).unwrap();
    let port = listener.local_addr().unwrap().port();

    let server = thread::spawn(move || {
        let (sock, _) = listener.accept().unwrap();
        let conn = ServerConnection::new(server_cfg).unwrap();
        let mut tls = StreamOwned::new(conn, sock);

        let mut request = Vec::new();
        let mut byte = [0u8; 1];
        while !request.ends_with(b"\r\n\r\n") {
            tls.read_exact(&mut byte).unwrap();
            request.push(byte[0]);
        }

        tls.write_all(
            b"HTTP/1.1 200 OK\r\nTransfer-Encoding: chunked\r\n\r\n\
              5\r\nhello\r\n6\r\n world\r\n0\r\n\r\n",
        )
        .unwrap();
        tls.conn.send_close_notify();
        tls.flush().unwrap();

        let mut rest = Vec::new();
        let closed_cleanly = tls.read_to_end(&mut rest).is_ok();
        (String::from_utf8(request).unwrap(), closed_cleanly)
    });

    let settings = ClientSettings {
        port,
        ..ClientSettings::default()
    };
    let client = HttpClient::with_parts(
        FixedResolver::to(Ipv4Addr::LOCALHOST),
        TlsDialer::with_context(client_cfg),
        settings,
    );

    let response = client.get("localhost", "/v2/sholat/kota/semua").unwrap();
    assert_eq!(response.status_code(), 200);
    assert_eq!(response.body(), b"hello world");

    let (request, closed_cleanly) = server.join().unwrap();
    assert!(request.starts_with("GET /v2/sholat/kota/semua HTTP/1.1\r\n"));
    assert!(request.contains("Host: localhost\r\n"));
    assert!(closed_cleanly, "client did not send close_notify");
}
