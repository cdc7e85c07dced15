pub trait Packet {
    fn packet_id() -> u32;
}

#[macro_export]
macro_rules! define_enum {
    ($(
    $name:ident {
        $(
        $field:ident = $value:literal
        ),* $(,)*
    }
    );* $(;)*) => {
        $(
        #[derive(Debug, Copy, Clone, PartialEq, Eq)]
        pub enum $name {
            $(
            $field
            ),*
        }

        impl $name {
            pub fn id(&self) -> $crate::net_io::VarInt {
                use $name::*;
                $crate::net_io::VarInt(match self {
                    $(
                    $field => $value,
                    )*
                })
            }
        }

        impl $crate::net_io::PacketWrite for $name {
            fn pack_write(&self, buffer: &mut Vec<u8>) -> std::io::Result<()> {
                $crate::net_io::PacketWrite::pack_write(&self.id(), buffer)
            }
        }
        )*
    };
}

/// Declares packets we send to a server. The generated `PacketWrite` impl
/// emits the packet id followed by each field in declaration order; the outer
/// length prefix is added by `PacketEncoder`.
#[macro_export]
macro_rules! serverbound_packets {
    ($(
    $name:ident ($id:literal) {
        $(
        $field_name:ident: $field_ty:ty
        ),* $(,)?
    }
    );* $(;)?) => {
        $(
            #[derive(Debug, Clone)]
            pub struct $name {
                $(
                pub $field_name: $field_ty
                ),*
            }

            impl $name {
                pub fn new($($field_name: $field_ty),*) -> Self {
                    Self {
                        $(
                        $field_name
                        ),*
                    }
                }
            }

            impl $crate::net_io::packet::Packet for $name {
                fn packet_id() -> u32 {
                    $id
                }
            }

            impl $crate::net_io::PacketWrite for $name {
                fn pack_write(&self, buffer: &mut Vec<u8>) -> std::io::Result<()> {
                    $crate::net_io::PacketWrite::pack_write(&$crate::net_io::VarInt($id), buffer)?;
                    $(
                    $crate::net_io::PacketWrite::pack_write(&self.$field_name, buffer)?;
                    )*

                    Ok(())
                }
            }
        )*
    };
}
