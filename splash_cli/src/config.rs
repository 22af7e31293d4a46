use lib_splash::constants::RLE_TOGGLE_ENV;
use lib_splash::EncodeOptions;
use log::debug;

/// Resolves the body kind for `encode`.
///
/// The `--raw` switch always wins. Otherwise `RLE24=0` selects raw bodies and
/// any other value, or no value, keeps RLE.
pub fn encode_options(raw_switch: bool, rle_toggle: Option<&str>) -> EncodeOptions {
    let disabled_by_env = rle_toggle.map(str::trim) == Some("0");
    let options = if raw_switch || disabled_by_env {
        EncodeOptions::raw()
    } else {
        EncodeOptions::rle()
    };
    debug!(
        "Encode options: kind={} (--raw={}, {}={:?})",
        options.kind, raw_switch, RLE_TOGGLE_ENV, rle_toggle
    );
    options
}

pub fn encode_options_from_env(raw_switch: bool) -> EncodeOptions {
    let toggle = std::env::var(RLE_TOGGLE_ENV).ok();
    encode_options(raw_switch, toggle.as_deref())
}
