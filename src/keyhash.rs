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

//! Public key hash destinations.

use bitcoin::hashes::Hash;
use bitcoin::util::address::WitnessVersion;
use bitcoin::{PubkeyHash, PublicKey, Script, WPubkeyHash};

use crate::PubkeyScript;

tx_destination!(
    /// Hash of a public key spent with a legacy P2PKH output.
    PubkeyHashDestination(PubkeyHash, 20) => PubkeyHash
);

tx_destination!(
    /// Hash of a public key spent with a witness v0 P2WPKH output.
    WitnessPubkeyHashDestination(WPubkeyHash, 20) => WitnessPubkeyHash
);

impl PubkeyHashDestination {
    /// Constructs destination from the `hash160` of the serialized public key.
    #[inline]
    pub fn from_pubkey(pubkey: &PublicKey) -> Self { pubkey.pubkey_hash().into() }

    /// Generates P2PKH `scriptPubkey`.
    #[inline]
    pub fn spend_script(&self) -> PubkeyScript { Script::new_p2pkh(&self.digest()).into() }
}

impl WitnessPubkeyHashDestination {
    /// Constructs destination from the `hash160` of the serialized public key.
    /// Returns `None` for uncompressed keys, which can't be used in witness
    /// outputs.
    #[inline]
    pub fn from_pubkey(pubkey: &PublicKey) -> Option<Self> {
        pubkey.wpubkey_hash().map(Self::from)
    }

    /// Generates witness v0 `scriptPubkey`.
    #[inline]
    pub fn spend_script(&self) -> PubkeyScript {
        Script::new_witness_program(WitnessVersion::V0, self.as_bytes()).into()
    }

    /// Generates P2PKH `scriptPubkey` for the same key hash. Used as the
    /// script code in witness v0 signing and in P2WPKH-in-P2SH constructions.
    #[inline]
    pub fn legacy_script_pubkey(&self) -> PubkeyScript {
        PubkeyHashDestination::from(self.clone()).spend_script()
    }
}

impl From<PubkeyHashDestination> for WitnessPubkeyHashDestination {
    fn from(pkh: PubkeyHashDestination) -> Self {
        WPubkeyHash::from_inner(pkh.digest().into_inner()).into()
    }
}

impl From<WitnessPubkeyHashDestination> for PubkeyHashDestination {
    fn from(wpkh: WitnessPubkeyHashDestination) -> Self {
        PubkeyHash::from_inner(wpkh.digest().into_inner()).into()
    }
}
