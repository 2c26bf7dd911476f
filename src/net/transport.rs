//! TCP transport.

use std::net::{SocketAddrV4, TcpStream};

use log::debug;

use crate::error_handling::NetworkError;

/// Opens a TCP socket connected to `addr`.
///
/// `TcpStream::connect` owns the descriptor until the connection succeeds and
/// closes it itself on failure, so no socket outlives an error.
///
/// # Errors
///
/// `NetworkError::Connect` with the OS error.
pub fn connect(addr: SocketAddrV4) -> Result<TcpStream, NetworkError> {
    let stream = TcpStream::connect(addr).map_err(|source| NetworkError::Connect { addr, source })?;
    debug!("Connected to {addr}");
    Ok(stream)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error_handling::ErrorKind;
    use std::net::{Ipv4Addr, TcpListener};

    #[test]
    fn test_connect_to_local_listener() {
        let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).unwrap();
        let port = listener.local_addr().unwrap().port();
        let stream = connect(SocketAddrV4::new(Ipv4Addr::LOCALHOST, port)).unwrap();
        assert_eq!(stream.peer_addr().unwrap().port(), port);
    }

    #[test]
    fn test_refused_connection_is_connect_error() {
        // Bind then drop to get a port nobody listens on
        let port = {
            let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).unwrap();
            listener.local_addr().unwrap().port()
        };
        let err = connect(SocketAddrV4::new(Ipv4Addr::LOCALHOST, port)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConnectError);
    }
}
