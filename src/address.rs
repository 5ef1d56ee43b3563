// BP foundation libraries Bitcoin crates implementing the foundations of
// Bitcoin protocol by LNP/BP Association (https://lnp-bp.org)
//
// Written in 2020-2022 by
//     Dr. Maxim Orlovsky <orlovsky@lnp-bp.org>
//
// This software is distributed without any warranty.
//
// You should have received a copy of the Apache-2.0 License
// along with this software.
// If not, see <https://opensource.org/licenses/Apache-2.0>.

//! Addresses encoding transaction destinations for a specific network.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use bitcoin::util::address::{self, Payload, WitnessVersion};
use bitcoin::Address;

use crate::{
    Destination, DestinationKind, PubkeyHashDestination, PubkeyScript, ScriptHashDestination,
    WitnessPubkeyHashDestination, WitnessScriptHashDestination,
};

/// Destination encoded for a specific network. Unlike [`bitcoin::Address`]
/// it can represent only the four destination kinds.
///
/// Base58 addresses do not distinguish regtest from testnet: a regtest
/// P2PKH or P2SH address parses back with [`AddressNetwork::Testnet`].
/// Bech32 addresses keep the `bcrt` prefix and parse back as regtest.
#[derive(Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(
    feature = "serde",
    derive(::serde_with::SerializeDisplay, ::serde_with::DeserializeFromStr)
)]
pub struct DestinationAddress {
    /// Destination paid by the address
    pub destination: Destination,

    /// A type of the network used by the address
    pub network: AddressNetwork,
}

impl DestinationAddress {
    /// Constructs address for the destination and network.
    #[inline]
    pub fn new(destination: Destination, network: AddressNetwork) -> Self {
        DestinationAddress {
            destination,
            network,
        }
    }

    /// Returns format of the address.
    #[inline]
    pub fn format(&self) -> AddressFormat { self.destination.kind().into() }

    /// Returns script corresponding to the given address.
    #[inline]
    pub fn script_pubkey(&self) -> PubkeyScript { self.destination.spend_script() }

    /// Returns if the address is testnet-, signet- or regtest-specific
    #[inline]
    pub fn is_testnet(&self) -> bool { self.network.is_testnet() }
}

impl From<&DestinationAddress> for Address {
    fn from(address: &DestinationAddress) -> Self {
        Address {
            payload: Payload::from(&address.destination),
            network: address.network.bitcoin_network(),
        }
    }
}

impl From<DestinationAddress> for Address {
    #[inline]
    fn from(address: DestinationAddress) -> Self { Address::from(&address) }
}

impl TryFrom<Address> for DestinationAddress {
    type Error = AddressParseError;

    fn try_from(address: Address) -> Result<Self, Self::Error> {
        Ok(DestinationAddress {
            destination: Destination::try_from(address.payload)?,
            network: address.network.into(),
        })
    }
}

impl Display for DestinationAddress {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result { Display::fmt(&Address::from(self), f) }
}

impl FromStr for DestinationAddress {
    type Err = AddressParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DestinationAddress::try_from(Address::from_str(s)?)
    }
}

impl From<&Destination> for Payload {
    fn from(destination: &Destination) -> Self {
        match destination {
            Destination::PubkeyHash(pkh) => Payload::PubkeyHash(pkh.digest()),
            Destination::ScriptHash(sh) => Payload::ScriptHash(sh.digest()),
            Destination::WitnessPubkeyHash(wpkh) => Payload::WitnessProgram {
                version: WitnessVersion::V0,
                program: wpkh.to_bytes(),
            },
            Destination::WitnessScriptHash(wsh) => Payload::WitnessProgram {
                version: WitnessVersion::V0,
                program: wsh.to_bytes(),
            },
        }
    }
}

impl TryFrom<Payload> for Destination {
    type Error = AddressParseError;

    fn try_from(payload: Payload) -> Result<Self, Self::Error> {
        Ok(match payload {
            Payload::PubkeyHash(hash) => PubkeyHashDestination::from(hash).into(),
            Payload::ScriptHash(hash) => ScriptHashDestination::from(hash).into(),
            Payload::WitnessProgram { version, program } if version.to_num() == 0u8 => {
                match program.len() {
                    20 => WitnessPubkeyHashDestination::from_slice(&program)
                        .map_err(|_| AddressParseError::WrongProgramLength(program.len()))?
                        .into(),
                    32 => WitnessScriptHashDestination::from_slice(&program)
                        .map_err(|_| AddressParseError::WrongProgramLength(program.len()))?
                        .into(),
                    len => return Err(AddressParseError::WrongProgramLength(len)),
                }
            }
            Payload::WitnessProgram { version, .. } => {
                return Err(AddressParseError::UnsupportedWitnessVersion(version.to_num()))
            }
        })
    }
}

/// Errors parsing address strings.
#[derive(Clone, PartialEq, Eq, Debug, Display, Error, From)]
#[display(doc_comments)]
pub enum AddressParseError {
    /// invalid address encoding. Details: {0}
    #[from]
    InvalidAddress(address::Error),

    /// witness version {0} addresses do not encode a supported destination
    UnsupportedWitnessVersion(u8),

    /// witness v0 program of {0} bytes; must be either 20 or 32 bytes long
    WrongProgramLength(usize),

    /// unrecognized address network string; only `mainnet`, `testnet` and
    /// `regtest` are possible at address level
    UnrecognizedAddressNetwork,
}

/// Address format
#[derive(Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Debug, Display)]
pub enum AddressFormat {
    /// Pay-to-public key hash
    #[display("P2PKH")]
    P2pkh,

    /// Pay-to-script hash
    #[display("P2SH")]
    P2sh,

    /// Pay-to-witness public key hash
    #[display("P2WPKH")]
    P2wpkh,

    /// Pay-to-witness script pash
    #[display("P2WSH")]
    P2wsh,
}

impl From<DestinationKind> for AddressFormat {
    fn from(kind: DestinationKind) -> Self {
        match kind {
            DestinationKind::PubkeyHash => AddressFormat::P2pkh,
            DestinationKind::ScriptHash => AddressFormat::P2sh,
            DestinationKind::WitnessPubkeyHash => AddressFormat::P2wpkh,
            DestinationKind::WitnessScriptHash => AddressFormat::P2wsh,
        }
    }
}

/// Bitcoin network used by the address
#[derive(Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Debug, Display)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate", rename_all = "lowercase")
)]
pub enum AddressNetwork {
    /// Bitcoin mainnet
    #[display("mainnet")]
    Mainnet,

    /// Bitcoin testnet and signet
    #[display("testnet")]
    Testnet,

    /// Bitcoin regtest networks
    #[display("regtest")]
    Regtest,
}

impl FromStr for AddressNetwork {
    type Err = AddressParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_lowercase().as_str() {
            "mainnet" => AddressNetwork::Mainnet,
            "testnet" => AddressNetwork::Testnet,
            "regtest" => AddressNetwork::Regtest,
            _ => return Err(AddressParseError::UnrecognizedAddressNetwork),
        })
    }
}

impl From<bitcoin::Network> for AddressNetwork {
    fn from(network: bitcoin::Network) -> Self {
        match network {
            bitcoin::Network::Bitcoin => AddressNetwork::Mainnet,
            bitcoin::Network::Testnet => AddressNetwork::Testnet,
            bitcoin::Network::Signet => AddressNetwork::Testnet,
            bitcoin::Network::Regtest => AddressNetwork::Regtest,
        }
    }
}

impl AddressNetwork {
    /// Testnet and signet share address encoding, so
    /// [`AddressNetwork::Testnet`] maps to [`bitcoin::Network::Testnet`].
    pub fn bitcoin_network(self) -> bitcoin::Network {
        match self {
            AddressNetwork::Mainnet => bitcoin::Network::Bitcoin,
            AddressNetwork::Testnet => bitcoin::Network::Testnet,
            AddressNetwork::Regtest => bitcoin::Network::Regtest,
        }
    }

    /// Detects whether the network is a kind of test network (testnet, signet,
    /// regtest).
    #[inline]
    pub fn is_testnet(self) -> bool { self != Self::Mainnet }
}
