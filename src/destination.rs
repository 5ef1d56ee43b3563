// Descriptor wallet library extending bitcoin & miniscript functionality
// by LNP/BP Association (https://lnp-bp.org)
// Written in 2020-2022 by
//     Dr. Maxim Orlovsky <orlovsky@pandoracore.com>
//
// To the extent possible under law, the author(s) have dedicated all
// copyright and related and neighboring rights to this software to
// the public domain worldwide. This software is distributed without
// any warranty.
//
// You should have received a copy of the Apache-2.0 License
// along with this software.
// If not, see <https://opensource.org/licenses/Apache-2.0>.

//! Typed digests identifying who can spend a transaction output.

use std::fmt::{self, Display, Formatter};
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use amplify::Wrapper;

use crate::{
    AddressNetwork, DestinationAddress, DestinationError, PubkeyHashDestination, PubkeyScript,
    ScriptHashDestination, WitnessPubkeyHashDestination, WitnessScriptHashDestination,
};

/// Kind of the destination, distinguishing digests of the same size which
/// commit to different spending conditions.
#[derive(Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Debug, Display)]
#[cfg_attr(
    feature = "serde",
    derive(::serde_with::SerializeDisplay, ::serde_with::DeserializeFromStr)
)]
pub enum DestinationKind {
    /// Hash of a public key paid with P2PKH output
    #[display("pkh")]
    PubkeyHash,

    /// Hash of a redeem script paid with P2SH output
    #[display("sh")]
    ScriptHash,

    /// Hash of a public key paid with witness v0 P2WPKH output
    #[display("wpkh")]
    WitnessPubkeyHash,

    /// Hash of a witness script paid with witness v0 P2WSH output
    #[display("wsh")]
    WitnessScriptHash,
}

impl DestinationKind {
    /// Size of the digest used by destinations of this kind.
    pub fn digest_len(self) -> usize {
        match self {
            DestinationKind::PubkeyHash
            | DestinationKind::ScriptHash
            | DestinationKind::WitnessPubkeyHash => 20,
            DestinationKind::WitnessScriptHash => 32,
        }
    }

    /// Detects whether the destination is paid by a witness output.
    pub fn is_witness(self) -> bool {
        matches!(self, DestinationKind::WitnessPubkeyHash | DestinationKind::WitnessScriptHash)
    }

    /// Detects whether the destination commits to a script which has to be
    /// revealed on spending.
    pub fn is_script_hash(self) -> bool {
        matches!(self, DestinationKind::ScriptHash | DestinationKind::WitnessScriptHash)
    }
}

impl FromStr for DestinationKind {
    type Err = DestinationParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_lowercase().as_str() {
            "pkh" => DestinationKind::PubkeyHash,
            "sh" => DestinationKind::ScriptHash,
            "wpkh" => DestinationKind::WitnessPubkeyHash,
            "wsh" => DestinationKind::WitnessScriptHash,
            _ => return Err(DestinationParseError::UnknownPrefix(s.to_owned())),
        })
    }
}

/// Generates a destination type over a fixed-size hash newtype.
///
/// The generated type compares, orders and hashes by the digest bytes only.
/// When constructed from a hex string it keeps that string as its display
/// form.
macro_rules! tx_destination {
    (
        $(#[$attr:meta])*
        $name:ident($hash:ty, $len:literal) => $kind:ident
    ) => {
        $(#[$attr])*
        #[derive(Clone, Debug)]
        #[cfg_attr(
            feature = "serde",
            derive(::serde_with::SerializeDisplay, ::serde_with::DeserializeFromStr)
        )]
        pub struct $name {
            digest: $hash,
            repr: Option<Box<str>>,
        }

        impl $name {
            /// Size of the destination digest in bytes
            pub const LEN: usize = $len;

            /// Constructs destination from a digest slice. Fails with
            /// [`DestinationError::InvalidLength`] if the slice length differs
            /// from [`Self::LEN`].
            pub fn from_slice(bytes: &[u8]) -> Result<Self, $crate::DestinationError> {
                <$hash as ::bitcoin::hashes::Hash>::from_slice(bytes)
                    .map(Self::from)
                    .map_err(|_| $crate::DestinationError::InvalidLength {
                        kind: $crate::DestinationKind::$kind,
                        expected: $len,
                        actual: bytes.len(),
                    })
            }

            /// Constructs destination from a fixed-size digest.
            #[inline]
            pub fn from_byte_array(array: [u8; $len]) -> Self {
                Self::from(<$hash as ::bitcoin::hashes::Hash>::from_inner(array))
            }

            /// Constructs destination from a hexadecimal digest string, which
            /// is kept as the display form of the resulting value.
            pub fn from_hex(s: &str) -> Result<Self, $crate::DestinationError> {
                let bytes = <Vec<u8> as ::bitcoin::hashes::hex::FromHex>::from_hex(s)?;
                let mut destination = Self::from_slice(&bytes)?;
                destination.repr = Some(Box::from(s));
                Ok(destination)
            }

            /// Returns typed digest value.
            #[inline]
            pub fn digest(&self) -> $hash { self.digest }

            /// Returns digest bytes without copying them.
            #[inline]
            pub fn as_bytes(&self) -> &[u8] { &self.digest[..] }

            /// Returns a copy of the digest bytes.
            #[inline]
            pub fn to_bytes(&self) -> Vec<u8> { self.as_bytes().to_vec() }

            /// Returns hexadecimal digest representation.
            #[inline]
            pub fn to_hex(&self) -> String { self.to_string() }

            /// Returns the kind of the destination.
            #[inline]
            pub fn kind(&self) -> $crate::DestinationKind { $crate::DestinationKind::$kind }

            /// Encodes destination as an address for the given network.
            pub fn address(&self, network: $crate::AddressNetwork) -> $crate::DestinationAddress {
                $crate::DestinationAddress::new(self.clone().into(), network)
            }
        }

        impl Default for $name {
            fn default() -> Self { Self::from(<$hash as ::bitcoin::hashes::Hash>::all_zeros()) }
        }

        impl From<$hash> for $name {
            #[inline]
            fn from(digest: $hash) -> Self { $name { digest, repr: None } }
        }

        impl From<$name> for $hash {
            #[inline]
            fn from(destination: $name) -> Self { destination.digest }
        }

        impl AsRef<[u8]> for $name {
            #[inline]
            fn as_ref(&self) -> &[u8] { self.as_bytes() }
        }

        impl PartialEq for $name {
            fn eq(&self, other: &Self) -> bool { self.as_bytes() == other.as_bytes() }
        }

        impl Eq for $name {}

        impl PartialOrd for $name {
            fn partial_cmp(&self, other: &Self) -> Option<::std::cmp::Ordering> {
                Some(self.cmp(other))
            }
        }

        impl Ord for $name {
            fn cmp(&self, other: &Self) -> ::std::cmp::Ordering {
                self.as_bytes().cmp(other.as_bytes())
            }
        }

        impl ::std::hash::Hash for $name {
            fn hash<H: ::std::hash::Hasher>(&self, state: &mut H) {
                ::std::hash::Hash::hash(self.as_bytes(), state)
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                match self.repr {
                    Some(ref repr) => f.write_str(repr),
                    None => f.write_str(&::bitcoin::hashes::hex::ToHex::to_hex(self.as_bytes())),
                }
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::DestinationError;

            #[inline]
            fn from_str(s: &str) -> Result<Self, Self::Err> { Self::from_hex(s) }
        }

        impl From<$name> for $crate::Destination {
            #[inline]
            fn from(destination: $name) -> Self { $crate::Destination::$kind(destination) }
        }

        impl TryFrom<$crate::Destination> for $name {
            type Error = $crate::Destination;

            fn try_from(destination: $crate::Destination) -> Result<Self, Self::Error> {
                match destination {
                    $crate::Destination::$kind(inner) => Ok(inner),
                    other => Err(other),
                }
            }
        }
    };
}

/// Destination of a transaction output: a typed digest of a public key or
/// script.
///
/// Destinations of different kinds never compare equal, even when their
/// digests are byte-identical. The [`Hash`] implementation covers the digest
/// bytes only, so such destinations collide in hashing containers and are
/// told apart by equality.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Debug)]
#[cfg_attr(
    feature = "serde",
    derive(::serde_with::SerializeDisplay, ::serde_with::DeserializeFromStr)
)]
pub enum Destination {
    /// P2PKH destination
    PubkeyHash(PubkeyHashDestination),

    /// P2SH destination
    ScriptHash(ScriptHashDestination),

    /// P2WPKH destination
    WitnessPubkeyHash(WitnessPubkeyHashDestination),

    /// P2WSH destination
    WitnessScriptHash(WitnessScriptHashDestination),
}

impl Destination {
    /// Constructs destination of a given kind from a digest slice.
    pub fn with_kind(kind: DestinationKind, bytes: &[u8]) -> Result<Self, DestinationError> {
        Ok(match kind {
            DestinationKind::PubkeyHash => PubkeyHashDestination::from_slice(bytes)?.into(),
            DestinationKind::ScriptHash => ScriptHashDestination::from_slice(bytes)?.into(),
            DestinationKind::WitnessPubkeyHash => {
                WitnessPubkeyHashDestination::from_slice(bytes)?.into()
            }
            DestinationKind::WitnessScriptHash => {
                WitnessScriptHashDestination::from_slice(bytes)?.into()
            }
        })
    }

    /// Detects destination paid by a `scriptPubkey`. Returns `None` for
    /// scripts which are not P2PKH, P2SH, P2WPKH or P2WSH.
    pub fn from_script_pubkey(script: &PubkeyScript) -> Option<Self> {
        let script = script.as_inner();
        let bytes = script.as_bytes();
        let (kind, digest) = if script.is_p2pkh() {
            (DestinationKind::PubkeyHash, &bytes[3..23])
        } else if script.is_p2sh() {
            (DestinationKind::ScriptHash, &bytes[2..22])
        } else if script.is_v0_p2wpkh() {
            (DestinationKind::WitnessPubkeyHash, &bytes[2..22])
        } else if script.is_v0_p2wsh() {
            (DestinationKind::WitnessScriptHash, &bytes[2..34])
        } else {
            return None;
        };
        Destination::with_kind(kind, digest).ok()
    }

    /// Returns the kind of the destination.
    pub fn kind(&self) -> DestinationKind {
        match self {
            Destination::PubkeyHash(_) => DestinationKind::PubkeyHash,
            Destination::ScriptHash(_) => DestinationKind::ScriptHash,
            Destination::WitnessPubkeyHash(_) => DestinationKind::WitnessPubkeyHash,
            Destination::WitnessScriptHash(_) => DestinationKind::WitnessScriptHash,
        }
    }

    /// Returns digest bytes without copying them.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Destination::PubkeyHash(d) => d.as_bytes(),
            Destination::ScriptHash(d) => d.as_bytes(),
            Destination::WitnessPubkeyHash(d) => d.as_bytes(),
            Destination::WitnessScriptHash(d) => d.as_bytes(),
        }
    }

    /// Returns a copy of the digest bytes.
    #[inline]
    pub fn to_bytes(&self) -> Vec<u8> { self.as_bytes().to_vec() }

    /// Returns hexadecimal digest representation, without the kind prefix.
    pub fn to_hex(&self) -> String {
        match self {
            Destination::PubkeyHash(d) => d.to_hex(),
            Destination::ScriptHash(d) => d.to_hex(),
            Destination::WitnessPubkeyHash(d) => d.to_hex(),
            Destination::WitnessScriptHash(d) => d.to_hex(),
        }
    }

    /// Generates `scriptPubkey` paying to the destination.
    pub fn spend_script(&self) -> PubkeyScript {
        match self {
            Destination::PubkeyHash(d) => d.spend_script(),
            Destination::ScriptHash(d) => d.spend_script(),
            Destination::WitnessPubkeyHash(d) => d.spend_script(),
            Destination::WitnessScriptHash(d) => d.spend_script(),
        }
    }

    /// Encodes destination as an address for the given network.
    #[inline]
    pub fn address(&self, network: AddressNetwork) -> DestinationAddress {
        DestinationAddress::new(self.clone(), network)
    }

    /// Detects whether the destination is spent by revealing a script.
    #[inline]
    pub fn is_script_hash(&self) -> bool { self.kind().is_script_hash() }
}

impl Hash for Destination {
    fn hash<H: Hasher>(&self, state: &mut H) { self.as_bytes().hash(state) }
}

impl AsRef<[u8]> for Destination {
    #[inline]
    fn as_ref(&self) -> &[u8] { self.as_bytes() }
}

impl Display for Destination {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.kind(), self.to_hex())
    }
}

/// Errors parsing destination strings.
#[derive(Clone, PartialEq, Eq, Debug, Display, Error, From)]
#[display(doc_comments)]
pub enum DestinationParseError {
    /// unknown destination prefix `{0}`; expected `pkh`, `sh`, `wpkh` or `wsh`
    /// only
    UnknownPrefix(String),

    /// unrecognized destination string format
    UnrecognizedStringFormat,

    /// destination must be prefixed by its kind, i.e. `pkh(<digest>)`
    PrefixAbsent,

    /// invalid destination digest. Details: {0}
    #[from]
    InvalidDigest(DestinationError),
}

impl FromStr for Destination {
    type Err = DestinationParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut split = s.split('(');
        match (split.next(), split.next(), split.next()) {
            (_, _, Some(_)) => Err(DestinationParseError::UnrecognizedStringFormat),
            (Some(""), ..) | (None, ..) => Err(DestinationParseError::PrefixAbsent),
            (Some(_), None, None) => Err(DestinationParseError::PrefixAbsent),
            (Some(prefix), Some(hex), None) => {
                let hex = hex
                    .strip_suffix(')')
                    .ok_or(DestinationParseError::UnrecognizedStringFormat)?;
                Ok(match DestinationKind::from_str(prefix)? {
                    DestinationKind::PubkeyHash => PubkeyHashDestination::from_hex(hex)?.into(),
                    DestinationKind::ScriptHash => ScriptHashDestination::from_hex(hex)?.into(),
                    DestinationKind::WitnessPubkeyHash => {
                        WitnessPubkeyHashDestination::from_hex(hex)?.into()
                    }
                    DestinationKind::WitnessScriptHash => {
                        WitnessScriptHashDestination::from_hex(hex)?.into()
                    }
                })
            }
        }
    }
}

#[cfg(test)]
mod test {
    use std::collections::HashSet;

    use bitcoin::hashes::hex::FromHex;
    use bitcoin::hashes::Hash as _;
    use bitcoin::Script;

    use super::*;

    #[test]
    fn kind_scoped_equality() {
        let bytes = [0x5au8; 20];
        let pkh = Destination::from(PubkeyHashDestination::from_byte_array(bytes));
        let sh = Destination::from(ScriptHashDestination::from_byte_array(bytes));
        let wpkh = Destination::from(WitnessPubkeyHashDestination::from_byte_array(bytes));
        assert_ne!(pkh, sh);
        assert_ne!(pkh, wpkh);
        assert_ne!(sh, wpkh);
        assert_eq!(pkh, Destination::from(PubkeyHashDestination::from_byte_array(bytes)));
        assert_eq!(pkh.as_bytes(), sh.as_bytes());
    }

    #[test]
    fn hash_set_keeps_kinds_apart() {
        let bytes = [0x01u8; 20];
        let mut set = HashSet::new();
        assert!(set.insert(Destination::from(PubkeyHashDestination::from_byte_array(bytes))));
        assert!(set.insert(Destination::from(ScriptHashDestination::from_byte_array(bytes))));
        assert!(!set.insert(Destination::from(ScriptHashDestination::from_byte_array(bytes))));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn to_bytes_copies() {
        let destination = ScriptHashDestination::from_byte_array([7u8; 20]);
        let mut copy = destination.to_bytes();
        copy[0] = 0;
        assert_eq!(destination.to_bytes(), vec![7u8; 20]);
        assert_eq!(destination.as_bytes(), &[7u8; 20][..]);
    }

    #[test]
    fn invalid_length() {
        for len in [0usize, 19, 21, 32] {
            assert_eq!(
                PubkeyHashDestination::from_slice(&vec![0u8; len]),
                Err(DestinationError::InvalidLength {
                    kind: DestinationKind::PubkeyHash,
                    expected: 20,
                    actual: len
                })
            );
            assert!(matches!(
                WitnessPubkeyHashDestination::from_slice(&vec![0u8; len]),
                Err(DestinationError::InvalidLength { expected: 20, .. })
            ));
        }
        assert!(matches!(
            WitnessScriptHashDestination::from_slice(&[0u8; 20]),
            Err(DestinationError::InvalidLength {
                kind: DestinationKind::WitnessScriptHash,
                expected: 32,
                actual: 20
            })
        ));
        assert!(matches!(
            ScriptHashDestination::from_hex("00"),
            Err(DestinationError::InvalidLength { actual: 1, .. })
        ));
    }

    #[test]
    fn invalid_encoding() {
        assert!(matches!(
            PubkeyHashDestination::from_hex("zz"),
            Err(DestinationError::InvalidEncoding(_))
        ));
        assert!(matches!(
            WitnessScriptHashDestination::from_hex("abc"),
            Err(DestinationError::InvalidEncoding(_))
        ));
    }

    #[test]
    fn hex_keeps_provided_string() {
        let upper = "00112233445566778899AABBCCDDEEFF00112233";
        let destination = PubkeyHashDestination::from_hex(upper).unwrap();
        assert_eq!(destination.to_string(), upper);
        assert_eq!(
            destination,
            PubkeyHashDestination::from_hex(&upper.to_lowercase()).unwrap()
        );
        assert_eq!(
            PubkeyHashDestination::from_slice(destination.as_bytes())
                .unwrap()
                .to_string(),
            upper.to_lowercase()
        );
    }

    #[test]
    fn hex_round_trip() {
        let destinations = [
            Destination::from(PubkeyHashDestination::from_byte_array([1u8; 20])),
            Destination::from(ScriptHashDestination::from_byte_array([2u8; 20])),
            Destination::from(WitnessPubkeyHashDestination::from_byte_array([3u8; 20])),
            Destination::from(WitnessScriptHashDestination::from_byte_array([4u8; 32])),
        ];
        for destination in destinations {
            let restored = Destination::with_kind(
                destination.kind(),
                &Vec::from_hex(&destination.to_hex()).unwrap(),
            )
            .unwrap();
            assert_eq!(restored, destination);
            assert_eq!(Destination::from_str(&destination.to_string()).unwrap(), destination);
        }
        let pkh = PubkeyHashDestination::from_byte_array([9u8; 20]);
        assert_eq!(PubkeyHashDestination::from_hex(&pkh.to_hex()).unwrap(), pkh);
    }

    #[test]
    fn destination_string_format() {
        let wsh = WitnessScriptHashDestination::default();
        assert_eq!(Destination::from(wsh).to_string(), format!("wsh({})", "00".repeat(32)));
        assert_eq!(
            Destination::from_str("sh(0000000000000000000000000000000000000000)").unwrap(),
            Destination::from(ScriptHashDestination::default())
        );
        assert_eq!(
            Destination::from_str("tr(00)"),
            Err(DestinationParseError::UnknownPrefix(s!("tr")))
        );
        assert_eq!(
            Destination::from_str("0000000000000000000000000000000000000000"),
            Err(DestinationParseError::PrefixAbsent)
        );
        assert_eq!(
            Destination::from_str("pkh(pkh(00))"),
            Err(DestinationParseError::UnrecognizedStringFormat)
        );
        let hex = "ab".repeat(20);
        assert_eq!(
            Destination::from_str(&format!("pkh({}", hex)),
            Err(DestinationParseError::UnrecognizedStringFormat)
        );
        assert!(matches!(
            Destination::from_str(&format!("pkh({}))", hex)),
            Err(DestinationParseError::InvalidDigest(DestinationError::InvalidEncoding(_)))
        ));
        assert!(matches!(
            Destination::from_str("wpkh(00)"),
            Err(DestinationParseError::InvalidDigest(DestinationError::InvalidLength { .. }))
        ));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_string_forms() {
        let kind = DestinationKind::WitnessPubkeyHash;
        let json = serde_json::to_string(&kind).unwrap();
        assert_eq!(json, "\"wpkh\"");
        let tag: String = serde_json::from_str(&json).unwrap();
        assert_eq!(DestinationKind::from_str(&tag), Ok(kind));
        assert_eq!(serde_json::from_str::<DestinationKind>(&json).unwrap(), kind);

        let destination = Destination::from(PubkeyHashDestination::from_byte_array([0xab; 20]));
        let json = serde_json::to_string(&destination).unwrap();
        assert_eq!(json, format!("\"pkh({})\"", "ab".repeat(20)));
        assert_eq!(serde_json::from_str::<Destination>(&json).unwrap(), destination);

        let address = destination.address(AddressNetwork::Mainnet);
        let json = serde_json::to_string(&address).unwrap();
        assert_eq!(json, format!("\"{}\"", address));
        assert_eq!(serde_json::from_str::<DestinationAddress>(&json).unwrap(), address);

        let script = destination.spend_script();
        let json = serde_json::to_string(&script).unwrap();
        assert_eq!(json, format!("\"76a914{}88ac\"", "ab".repeat(20)));
        assert_eq!(serde_json::from_str::<PubkeyScript>(&json).unwrap(), script);
    }

    #[test]
    fn zero_digest_constructors_agree() {
        let from_bytes = PubkeyHashDestination::from_slice(&[0u8; 20]).unwrap();
        let from_typed = PubkeyHashDestination::from(bitcoin::PubkeyHash::all_zeros());
        let from_hex = PubkeyHashDestination::from_hex(&"00".repeat(20)).unwrap();
        let default = PubkeyHashDestination::default();
        let expected = Script::from(
            Vec::from_hex("76a914000000000000000000000000000000000000000088ac").unwrap(),
        );
        for destination in [from_bytes, from_typed, from_hex, default] {
            assert_eq!(destination.spend_script().as_inner(), &expected);
        }
    }

    #[test]
    fn script_pubkey_detection() {
        let destinations = [
            Destination::from(PubkeyHashDestination::from_byte_array([1u8; 20])),
            Destination::from(ScriptHashDestination::from_byte_array([1u8; 20])),
            Destination::from(WitnessPubkeyHashDestination::from_byte_array([1u8; 20])),
            Destination::from(WitnessScriptHashDestination::from_byte_array([1u8; 32])),
        ];
        for destination in destinations {
            let script = destination.spend_script();
            assert_eq!(script.destination(), Some(destination));
        }
        let op_return = PubkeyScript::from(Script::new_op_return(&[1, 2, 3]));
        assert_eq!(Destination::from_script_pubkey(&op_return), None);
    }
}
