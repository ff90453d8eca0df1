mod test_handshake;
mod test_http_endpoints;
mod test_not_ready;
mod test_socket_signaling;
