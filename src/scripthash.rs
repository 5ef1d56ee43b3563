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

//! Script hash destinations and matching of scripts revealed by their
//! spending inputs.

use amplify::Wrapper;
use bitcoin::blockdata::script::Instruction;
use bitcoin::util::address::WitnessVersion;
use bitcoin::{Script, ScriptHash, TxIn, WScriptHash};

use crate::{
    Coin, DestinationKind, PubkeyScript, RedeemMatch, RedeemScript, ScriptCoin, WitnessScript,
};

tx_destination!(
    /// `hash160` of a redeem script spent with a legacy P2SH output.
    ScriptHashDestination(ScriptHash, 20) => ScriptHash
);

tx_destination!(
    /// Double SHA-256 of a witness script spent with a witness v0 P2WSH
    /// output.
    WitnessScriptHashDestination(WScriptHash, 32) => WitnessScriptHash
);

impl ScriptHashDestination {
    /// Constructs destination committing to the redeem script. This hashes
    /// the script revealed on spending, not the output script.
    #[inline]
    pub fn from_script(redeem_script: &RedeemScript) -> Self { redeem_script.script_hash().into() }

    /// Generates P2SH `scriptPubkey`.
    #[inline]
    pub fn spend_script(&self) -> PubkeyScript { Script::new_p2sh(&self.digest()).into() }
}

impl WitnessScriptHashDestination {
    /// Constructs destination committing to the witness script.
    #[inline]
    pub fn from_script(witness_script: &WitnessScript) -> Self {
        witness_script.script_hash().into()
    }

    /// Generates witness v0 `scriptPubkey`.
    #[inline]
    pub fn spend_script(&self) -> PubkeyScript {
        Script::new_witness_program(WitnessVersion::V0, self.as_bytes()).into()
    }
}

impl From<&RedeemScript> for ScriptHashDestination {
    #[inline]
    fn from(redeem_script: &RedeemScript) -> Self { Self::from_script(redeem_script) }
}

impl From<&WitnessScript> for WitnessScriptHashDestination {
    #[inline]
    fn from(witness_script: &WitnessScript) -> Self { Self::from_script(witness_script) }
}

impl RedeemMatch for ScriptHashDestination {
    type Redeem = RedeemScript;
    const KIND: DestinationKind = DestinationKind::ScriptHash;

    fn extract_redeem_script(&self, txin: &TxIn) -> Option<RedeemScript> {
        match txin.script_sig.instructions().last() {
            Some(Ok(Instruction::PushBytes(data))) => {
                Some(RedeemScript::from_inner(Script::from(data.to_vec())))
            }
            Some(Ok(Instruction::Op(opcode))) => {
                log::trace!("scriptSig of {} ends with {:?}", txin.previous_output, opcode);
                None
            }
            Some(Err(err)) => {
                log::trace!("unparsable scriptSig in {}: {}", txin.previous_output, err);
                None
            }
            None => None,
        }
    }

    #[inline]
    fn is_committed_to(&self, redeem: &RedeemScript) -> bool {
        redeem.script_hash() == self.digest()
    }

    #[inline]
    fn attach_redeem(coin: &Coin, redeem: RedeemScript) -> ScriptCoin {
        coin.with_script_redeem(redeem)
    }
}

impl RedeemMatch for WitnessScriptHashDestination {
    type Redeem = WitnessScript;
    const KIND: DestinationKind = DestinationKind::WitnessScriptHash;

    fn extract_redeem_script(&self, txin: &TxIn) -> Option<WitnessScript> {
        txin.witness
            .last()
            .map(|data| WitnessScript::from_inner(Script::from(data.to_vec())))
    }

    #[inline]
    fn is_committed_to(&self, redeem: &WitnessScript) -> bool {
        redeem.script_hash() == self.digest()
    }

    #[inline]
    fn attach_redeem(coin: &Coin, redeem: WitnessScript) -> ScriptCoin {
        coin.with_witness_redeem(redeem)
    }
}
