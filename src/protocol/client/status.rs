use crate::serverbound_packets;

serverbound_packets! {
    PacketStatusRequest(0x00) {}
}
