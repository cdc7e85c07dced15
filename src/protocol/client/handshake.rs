use crate::net_io::VarInt;
use crate::{define_enum, serverbound_packets};

define_enum! {
    HandshakeState {
        Status = 1
    }
}

serverbound_packets! {
    PacketHandshake(0x00) {
        protocol_version: VarInt,
        server_address: String,
        server_port: u16,
        next_state: HandshakeState
    }
}

impl PacketHandshake {
    /// Handshake that switches the connection into the status state.
    pub fn status(protocol_version: u32, host: &str, port: u16) -> Self {
        Self::new(
            VarInt(protocol_version),
            host.to_string(),
            port,
            HandshakeState::Status,
        )
    }
}
