// src/aliases.rs
//! Secret containers used throughout passvault
//!
//! Each wraps a `secrecy::SecretBox`: the value is zeroized on drop, never
//! printed by `Debug`, and only readable through `expose_secret`.

use std::fmt;

use secrecy::{ExposeSecret, SecretBox};
use zeroize::Zeroizing;

macro_rules! secret_alias {
    ($(#[$meta:meta])* $name:ident, $inner:ty) => {
        $(#[$meta])*
        pub struct $name(SecretBox<$inner>);

        impl $name {
            pub fn new(value: $inner) -> Self {
                Self(SecretBox::new(Box::new(value)))
            }

            pub fn expose_secret(&self) -> &$inner {
                self.0.expose_secret()
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(concat!(stringify!($name), "([REDACTED])"))
            }
        }
    };
}

secret_alias!(
    /// PBKDF2 output, used as the AES-256-GCM key
    DerivedKey32,
    [u8; 32]
);
secret_alias!(
    /// Master passphrase, owned by the caller
    Passphrase,
    String
);
secret_alias!(
    /// Serialized vault before encryption / after decryption
    PlainText,
    Vec<u8>
);

impl Passphrase {
    /// Trimmed passphrase from typed input; `input` is wiped as it drops here
    pub fn from_input(input: Zeroizing<String>) -> Self {
        Self::new(input.trim().to_owned())
    }
}
