//! Status response decoding
//!
//! A `GET` of the basic status returns, among other things:
//!
//! ```text
//! <YAMAHA_AV rsp="GET" RC="0">
//!   <Main_Zone><Basic_Status>
//!     <Power_Control><Power>On</Power></Power_Control>
//!     <Volume><Lvl><Val>-400</Val><Exp>1</Exp><Unit>dB</Unit></Lvl><Mute>Off</Mute></Volume>
//!     <Input><Input_Sel>HDMI1</Input_Sel></Input>
//!   </Basic_Status></Main_Zone>
//! </YAMAHA_AV>
//! ```

use serde::Serialize;
use xmltree::Element;

use crate::command::CommandKind;
use crate::encode::ZONE;
use crate::error::{ApiError, Result};
use crate::value::Value;

const POWER_PATH: [&str; 4] = [ZONE, "Basic_Status", "Power_Control", "Power"];
const INPUT_PATH: [&str; 4] = [ZONE, "Basic_Status", "Input", "Input_Sel"];
const VOLUME_PATH: [&str; 5] = [ZONE, "Basic_Status", "Volume", "Lvl", "Val"];
const MUTE_PATH: [&str; 4] = [ZONE, "Basic_Status", "Volume", "Mute"];

/// Extract the value for `kind` from a raw status response
///
/// `State` is the raw document itself and is returned verbatim as text.
/// Power and mute accept only the words the receiver uses (`On`/`Standby`
/// and `On`/`Off`); anything else is a [`ApiError::MalformedResponse`].
pub fn decode(response: &str, kind: CommandKind) -> Result<Value> {
    if kind == CommandKind::State {
        return Ok(Value::Text(response.to_string()));
    }

    let root = parse(response)?;
    decode_field(&root, kind)
}

/// Read the `RC` response code attribute, `"0"` meaning accepted
pub fn response_code(response: &str) -> Option<String> {
    parse(response)
        .ok()
        .and_then(|root| root.attributes.get("RC").cloned())
}

fn parse(response: &str) -> Result<Element> {
    Element::parse(response.as_bytes())
        .map_err(|e| ApiError::MalformedResponse(format!("invalid XML: {}", e)))
}

fn decode_field(root: &Element, kind: CommandKind) -> Result<Value> {
    match kind {
        CommandKind::State => Err(ApiError::MalformedResponse(
            "state is not a status field".to_string(),
        )),
        CommandKind::Input => find_text(root, &INPUT_PATH).map(Value::Text),
        CommandKind::Volume => {
            let text = find_text(root, &VOLUME_PATH)?;
            text.trim()
                .parse::<i64>()
                .map(Value::Number)
                .map_err(|_| {
                    ApiError::MalformedResponse(format!("volume '{}' is not an integer", text))
                })
        }
        CommandKind::Mute => match find_text(root, &MUTE_PATH)?.as_str() {
            "On" => Ok(Value::Bool(true)),
            "Off" => Ok(Value::Bool(false)),
            other => Err(ApiError::MalformedResponse(format!("unknown mute state '{}'", other))),
        },
        CommandKind::Power => match find_text(root, &POWER_PATH)?.as_str() {
            "On" => Ok(Value::Bool(true)),
            "Standby" => Ok(Value::Bool(false)),
            other => Err(ApiError::MalformedResponse(format!("unknown power state '{}'", other))),
        },
    }
}

/// Text of the element at `path` below `root`
///
/// Surrounding spaces of real text are kept, but text made only of
/// whitespace reads back as an empty string.
fn find_text(root: &Element, path: &[&str]) -> Result<String> {
    let mut current = root;
    for name in path {
        current = current
            .get_child(*name)
            .ok_or_else(|| ApiError::MalformedResponse(format!("missing {}", path.join("/"))))?;
    }
    Ok(current
        .get_text()
        .map(|text| text.into_owned())
        .unwrap_or_default())
}

/// Every field of the basic status that could be decoded
///
/// A field that is absent or holds an unknown word is `None`; only a
/// response that is not XML at all fails.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BasicStatus {
    pub power: Option<bool>,
    pub input: Option<String>,
    pub volume: Option<i64>,
    pub mute: Option<bool>,
}

impl BasicStatus {
    pub fn parse(response: &str) -> Result<Self> {
        let root = parse(response)?;
        let field = |kind| decode_field(&root, kind).ok();

        Ok(Self {
            power: field(CommandKind::Power).and_then(|v| v.as_bool()),
            input: field(CommandKind::Input).and_then(|v| v.as_text().map(str::to_string)),
            volume: field(CommandKind::Volume).and_then(|v| v.as_i64()),
            mute: field(CommandKind::Mute).and_then(|v| v.as_bool()),
        })
    }

    /// Volume in dB, the receiver reporting with a fixed exponent of 1
    pub fn volume_db(&self) -> Option<f64> {
        self.volume.map(|v| v as f64 / 10.0)
    }
}
