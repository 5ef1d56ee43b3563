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

//! Script newtypes distinguishing the role a [`Script`] plays in a
//! transaction.

use amplify::Wrapper;
use bitcoin::blockdata::script::{self, Script};
use bitcoin::hashes::{sha256d, Hash};
use bitcoin::{ScriptHash, WScriptHash};

use crate::Destination;

/// A content of `scriptPubkey` from a transaction output
#[derive(
    Wrapper, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Debug, Display, From
)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate", transparent)
)]
#[display("{0}", alt = "{0:x}")]
#[wrapper(LowerHex, UpperHex)]
pub struct PubkeyScript(Script);

impl PubkeyScript {
    /// Detects the destination paid by the script. Returns `None` for any
    /// script which is not P2PKH, P2SH, P2WPKH or P2WSH.
    #[inline]
    pub fn destination(&self) -> Option<Destination> { Destination::from_script_pubkey(self) }
}

/// A content of `scriptSig` from a transaction input
#[derive(
    Wrapper, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Debug, Display, From
)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate", transparent)
)]
#[display("{0}", alt = "{0:x}")]
#[wrapper(LowerHex, UpperHex)]
pub struct SigScript(Script);

/// Redeem script as part of the `scriptSig` structure; it is hashed for P2SH
/// output.
#[derive(
    Wrapper, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Debug, Display, From
)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate", transparent)
)]
#[display("{0}", alt = "{0:x}")]
#[wrapper(LowerHex, UpperHex)]
pub struct RedeemScript(Script);

impl RedeemScript {
    /// Computes `hash160` script commitment which participates in P2SH
    /// [`PubkeyScript`]
    #[inline]
    pub fn script_hash(&self) -> ScriptHash { self.as_inner().script_hash() }

    /// Generates P2SH [`PubkeyScript`] matching given `redeemScript`
    #[inline]
    pub fn to_p2sh(&self) -> PubkeyScript { Script::new_p2sh(&self.script_hash()).into() }
}

impl From<RedeemScript> for SigScript {
    #[inline]
    fn from(redeem_script: RedeemScript) -> Self {
        script::Builder::new()
            .push_slice(redeem_script.as_inner().as_bytes())
            .into_script()
            .into()
    }
}

/// A content of the script from `witness` structure; an equivalent of
/// `redeemScript` for witness-based transaction inputs.
///
/// Unlike [`RedeemScript`], the commitment is a 32-byte double SHA-256 digest
/// stored as [`WScriptHash`]. Note that BIP-141 commits to a single SHA-256
/// of the script, so digests produced here do not match P2WSH outputs created
/// by other software.
#[derive(
    Wrapper, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Debug, Display, From
)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate", transparent)
)]
#[display("{0}", alt = "{0:x}")]
#[wrapper(LowerHex, UpperHex)]
pub struct WitnessScript(Script);

impl WitnessScript {
    /// Computes double SHA-256 script commitment.
    #[inline]
    pub fn script_hash(&self) -> WScriptHash {
        WScriptHash::from_inner(sha256d::Hash::hash(self.as_inner().as_bytes()).into_inner())
    }

    /// Generates witness v0 [`PubkeyScript`] matching given `witnessScript`.
    #[inline]
    pub fn to_p2wsh(&self) -> PubkeyScript { Script::new_v0_p2wsh(&self.script_hash()).into() }
}

impl From<RedeemScript> for WitnessScript {
    fn from(redeem_script: RedeemScript) -> Self { WitnessScript(redeem_script.into_inner()) }
}

impl From<WitnessScript> for RedeemScript {
    fn from(witness_script: WitnessScript) -> Self { RedeemScript(witness_script.into_inner()) }
}

#[cfg(test)]
mod test {
    use bitcoin::blockdata::opcodes::all::OP_PUSHNUM_1;
    use bitcoin::hashes::hex::{FromHex, ToHex};
    use bitcoin::hashes::{hash160, sha256};

    use super::*;

    fn op_true() -> Script { script::Builder::new().push_opcode(OP_PUSHNUM_1).into_script() }

    #[test]
    fn redeem_script_hash160() {
        let redeem = RedeemScript::from(op_true());
        assert_eq!(
            &redeem.script_hash()[..],
            &hash160::Hash::hash(&[0x51])[..]
        );
        assert!(redeem.to_p2sh().as_inner().is_p2sh());
    }

    #[test]
    fn witness_script_double_sha256() {
        let witness_script = WitnessScript::from(op_true());
        let double = sha256d::Hash::hash(&[0x51]);
        let single = sha256::Hash::hash(&[0x51]);
        assert_eq!(&witness_script.script_hash()[..], &double[..]);
        assert_ne!(&witness_script.script_hash()[..], &single[..]);
        assert!(witness_script.to_p2wsh().as_inner().is_v0_p2wsh());
    }

    #[test]
    fn sig_script_pushes_redeem() {
        let redeem = RedeemScript::from(Script::from(Vec::from_hex("5121").unwrap()));
        let sig_script = SigScript::from(redeem);
        assert_eq!(sig_script.as_inner().as_bytes().to_hex(), "025121");
    }
}
