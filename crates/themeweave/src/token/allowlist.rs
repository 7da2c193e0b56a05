//! Tokens safe for external consumption.
//!
//! The token engine computes far more values than presentation code should
//! depend on. Only the names in [`ALLOWED_TOKENS`] survive into a
//! [`ResolvedTheme`](crate::ResolvedTheme); every other computed key is
//! dropped.

use super::TokenMap;

/// Engine-computed token names that are republished to presentation code.
pub const ALLOWED_TOKENS: &[&str] = &[
    // Seed
    "borderRadius",
    "colorBgBase",
    "colorError",
    "colorInfo",
    "colorLink",
    "colorPrimary",
    "colorSuccess",
    "colorTextBase",
    "colorWarning",
    "controlHeight",
    "fontFamily",
    "fontFamilyCode",
    "fontSize",
    "lineType",
    "lineWidth",
    "zIndexBase",
    "zIndexPopupBase",
    // Primary family
    "colorPrimaryActive",
    "colorPrimaryBg",
    "colorPrimaryBgHover",
    "colorPrimaryBorder",
    "colorPrimaryBorderHover",
    "colorPrimaryHover",
    "colorPrimaryText",
    "colorPrimaryTextActive",
    "colorPrimaryTextHover",
    // Status families
    "colorErrorActive",
    "colorErrorBg",
    "colorErrorBgHover",
    "colorErrorBorder",
    "colorErrorBorderHover",
    "colorErrorHover",
    "colorErrorOutline",
    "colorErrorText",
    "colorErrorTextActive",
    "colorErrorTextHover",
    "colorInfoActive",
    "colorInfoBg",
    "colorInfoBgHover",
    "colorInfoBorder",
    "colorInfoBorderHover",
    "colorInfoHover",
    "colorInfoText",
    "colorInfoTextActive",
    "colorInfoTextHover",
    "colorSuccessActive",
    "colorSuccessBg",
    "colorSuccessBgHover",
    "colorSuccessBorder",
    "colorSuccessBorderHover",
    "colorSuccessHover",
    "colorSuccessText",
    "colorSuccessTextActive",
    "colorSuccessTextHover",
    "colorWarningActive",
    "colorWarningBg",
    "colorWarningBgHover",
    "colorWarningBorder",
    "colorWarningBorderHover",
    "colorWarningHover",
    "colorWarningOutline",
    "colorWarningText",
    "colorWarningTextActive",
    "colorWarningTextHover",
    "colorLinkActive",
    "colorLinkHover",
    // Neutrals
    "colorBgContainer",
    "colorBgContainerDisabled",
    "colorBgElevated",
    "colorBgLayout",
    "colorBgSpotlight",
    "colorBorder",
    "colorBorderBg",
    "colorBorderSecondary",
    "colorFill",
    "colorFillContent",
    "colorFillQuaternary",
    "colorFillSecondary",
    "colorFillTertiary",
    "colorHighlight",
    "colorIcon",
    "colorIconHover",
    "colorSplit",
    "colorText",
    "colorTextDescription",
    "colorTextDisabled",
    "colorTextHeading",
    "colorTextLabel",
    "colorTextLightSolid",
    "colorTextPlaceholder",
    "colorTextQuaternary",
    "colorTextSecondary",
    "colorTextTertiary",
    "colorWhite",
    // Controls
    "controlHeightLG",
    "controlHeightSM",
    "controlHeightXS",
    "controlItemBgActive",
    "controlItemBgHover",
    "controlOutline",
    // Typography
    "fontSizeHeading1",
    "fontSizeHeading2",
    "fontSizeHeading3",
    "fontSizeHeading4",
    "fontSizeHeading5",
    "fontSizeIcon",
    "fontSizeLG",
    "fontSizeSM",
    "fontSizeXL",
    "lineHeight",
    "lineHeightLG",
    "lineHeightSM",
    // Shape
    "borderRadiusLG",
    "borderRadiusOuter",
    "borderRadiusSM",
    "borderRadiusXS",
    "lineWidthBold",
    // Spacing
    "margin",
    "marginLG",
    "marginMD",
    "marginSM",
    "marginXL",
    "marginXS",
    "marginXXL",
    "marginXXS",
    "padding",
    "paddingContentHorizontal",
    "paddingContentVertical",
    "paddingLG",
    "paddingMD",
    "paddingSM",
    "paddingXL",
    "paddingXS",
    "paddingXXS",
    "size",
    "sizeLG",
    "sizeMD",
    "sizeMS",
    "sizeSM",
    "sizeXL",
    "sizeXS",
    "sizeXXL",
    "sizeXXS",
    // Motion and effects
    "boxShadow",
    "boxShadowSecondary",
    "boxShadowTertiary",
    "motionDurationFast",
    "motionDurationMid",
    "motionDurationSlow",
    "opacityLoading",
];

/// True when `name` is republished to presentation code.
pub fn is_allowed(name: &str) -> bool {
    ALLOWED_TOKENS.contains(&name)
}

/// Keeps only allow-listed entries of `computed`.
///
/// Allow-listed names missing from `computed` are skipped rather than
/// inserted as nulls.
pub fn filter_allowed(computed: &TokenMap) -> TokenMap {
    let filtered: TokenMap = ALLOWED_TOKENS
        .iter()
        .filter_map(|name| {
            computed
                .get(*name)
                .map(|value| (name.to_string(), value.clone()))
        })
        .collect();

    let dropped = computed.len() - filtered.len();
    if dropped > 0 {
        log::trace!(
            "allow-list dropped {} of {} computed tokens",
            dropped,
            computed.len()
        );
    }
    filtered
}
