//! Built-in translation data for the dashboard and result pages.
//!
//! Each locale is a flat list of `(key, text)` pairs. Keys are the values of
//! the `data-i18n` attributes the server renders into its templates.

// ==================== English Strings ====================

/// English strings (base locale)
pub const ENGLISH_STRINGS: &[(&str, &str)] = &[
    // Result page
    ("advice_label", "Advice"),
    ("symptoms_h4", "Symptoms"),
    ("actions_h4", "Immediate actions"),
    ("prevent_h4", "Prevention"),
    ("treatment_h4", "Treatment / Notes"),
    ("no_advice", "No advice available for this prediction."),
    ("feedback_title", "Feedback"),
    ("feedback_hint", "Type feedback here..."),
    ("feedback_send", "Send Feedback"),
    ("quick_upload", "Upload another image"),
    ("quick_history", "View my history"),
    ("predicted_label", "Predicted:"),
    ("confidence_prefix", "Confidence:"),
    ("status_healthy", "Healthy"),
    ("status_diseased", "Diseased — Action Needed"),
    ("status_unknown", "Status Unknown"),
    ("back_dashboard", "← Back to dashboard"),
    ("logout", "Logout"),
    // Dashboard
    ("recent_uploads_title", "Recent uploads"),
    ("recent_uploads_desc", "Click to view all uploaded images in a gallery."),
    ("view_all", "View all →"),
    ("quick_actions_title", "Quick actions"),
    ("quick_actions_desc", "Useful shortcuts for your account."),
    ("history_btn", "History"),
    ("upload_title", "Upload leaf image"),
    ("upload_desc", "Choose a clear photo to get a prediction on a result page."),
    ("upload_btn", "Upload & Predict"),
    ("image_preview", "Image preview"),
    ("recent_uploads_heading", "Recent uploads (latest)"),
    ("view_link", "View"),
    ("no_recent", "No recent uploads yet."),
];

// ==================== Hindi Strings ====================

pub const HINDI_STRINGS: &[(&str, &str)] = &[
    // Result page
    ("advice_label", "सलाह"),
    ("symptoms_h4", "लक्षण"),
    ("actions_h4", "तत्काल कार्रवाई"),
    ("prevent_h4", "रोकथाम"),
    ("treatment_h4", "उपचार / नोट्स"),
    ("no_advice", "इस पूर्वानुमान के लिए कोई सलाह उपलब्ध नहीं है।"),
    ("feedback_title", "प्रतिपुष्टि"),
    ("feedback_hint", "यहाँ प्रतिक्रिया लिखें..."),
    ("feedback_send", "प्रतिक्रिया भेजें"),
    ("quick_upload", "एक और छवि अपलोड करें"),
    ("quick_history", "मेरा इतिहास देखें"),
    ("predicted_label", "पूर्वानुमान:"),
    ("confidence_prefix", "विश्वास:"),
    ("status_healthy", "स्वस्थ"),
    ("status_diseased", "रोगग्रस्त — कार्रवाई आवश्यक"),
    ("status_unknown", "स्थिति अज्ञात"),
    ("back_dashboard", "← डैशबोर्ड पर वापस जाएँ"),
    ("logout", "लॉग आउट"),
    // Dashboard
    ("recent_uploads_title", "हाल की अपलोड"),
    ("recent_uploads_desc", "गैलरी में सभी अपलोड की गई छवियाँ देखने के लिए क्लिक करें।"),
    ("view_all", "सभी देखें →"),
    ("quick_actions_title", "त्वरित कार्य"),
    ("quick_actions_desc", "आपके खाते के लिए उपयोगी शॉर्टकट।"),
    ("history_btn", "इतिहास"),
    ("upload_title", "पत्ती की छवि अपलोड करें"),
    ("upload_desc", "परिणाम पृष्ठ पर भविष्यवाणी प्राप्त करने के लिए स्पष्ट फ़ोटो चुनें।"),
    ("upload_btn", "अपलोड और भविष्यवाणी"),
    ("image_preview", "छवि पूर्वावलोकन"),
    ("recent_uploads_heading", "हाल की अपलोड (नवीनतम)"),
    ("view_link", "देखें"),
    ("no_recent", "अभी तक कोई हालिया अपलोड नहीं।"),
];

// ==================== Marathi Strings ====================

pub const MARATHI_STRINGS: &[(&str, &str)] = &[
    // Result page
    ("advice_label", "सल्ला"),
    ("symptoms_h4", "लक्षणे"),
    ("actions_h4", "तत्काळ कृती"),
    ("prevent_h4", "प्रतिबंधक उपाय"),
    ("treatment_h4", "उपचार / टीप"),
    ("no_advice", "या भाकीतासाठी सल्ला उपलब्ध नाही."),
    ("feedback_title", "अभिप्राय"),
    ("feedback_hint", "येथे अभिप्राय टाका..."),
    ("feedback_send", "अभिप्राय पाठवा"),
    ("quick_upload", "एक इतर प्रतिमा अपलोड करा"),
    ("quick_history", "माझे इतिहास पाहा"),
    ("predicted_label", "भाकीत:"),
    ("confidence_prefix", "विश्वास:"),
    ("status_healthy", "सजग (Healthy)"),
    ("status_diseased", "रोगग्रस्त — कृती आवश्यक"),
    ("status_unknown", "स्थिती अज्ञात"),
    ("back_dashboard", "← डॅशबोर्डवर परत जा"),
    ("logout", "लॉग आउट"),
    // Dashboard
    ("recent_uploads_title", "अलीकडील अपलोड"),
    ("recent_uploads_desc", "गॅलरीमध्ये सर्व अपलोड केलेल्या प्रतिमा पाहण्यासाठी क्लिक करा."),
    ("view_all", "सर्व पहा →"),
    ("quick_actions_title", "जलद क्रिया"),
    ("quick_actions_desc", "तुमच्या खात्यासाठी उपयुक्त शॉर्टकट."),
    ("history_btn", "इतिहास"),
    ("upload_title", "पानाची प्रतिमा अपलोड करा"),
    ("upload_desc", "परिणाम पृष्ठावर भाकीत मिळवण्यासाठी एक स्पष्ट फोटो निवडा."),
    ("upload_btn", "अपलोड & भाकीत"),
    ("image_preview", "प्रतिमा पूर्वदर्शनी"),
    ("recent_uploads_heading", "अलीकडील अपलोड (नवीनतम)"),
    ("view_link", "पहा"),
    ("no_recent", "अजून कोणतीही अलीकडील अपलोड नाहीत."),
];

/// Built-in strings for a registry locale code.
pub fn strings_for(code: &str) -> Option<&'static [(&'static str, &'static str)]> {
    match code {
        "en" => Some(ENGLISH_STRINGS),
        "hi" => Some(HINDI_STRINGS),
        "mr" => Some(MARATHI_STRINGS),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn keys(strings: &[(&'static str, &'static str)]) -> HashSet<&'static str> {
        strings.iter().map(|(k, _)| *k).collect()
    }

    #[test]
    fn test_all_locales_share_the_same_keys() {
        let english = keys(ENGLISH_STRINGS);
        assert_eq!(english, keys(HINDI_STRINGS));
        assert_eq!(english, keys(MARATHI_STRINGS));
    }

    #[test]
    fn test_no_duplicate_keys() {
        for strings in [ENGLISH_STRINGS, HINDI_STRINGS, MARATHI_STRINGS] {
            assert_eq!(keys(strings).len(), strings.len());
        }
    }

    #[test]
    fn test_no_empty_text() {
        for strings in [ENGLISH_STRINGS, HINDI_STRINGS, MARATHI_STRINGS] {
            assert!(strings.iter().all(|(_, text)| !text.trim().is_empty()));
        }
    }

    #[test]
    fn test_strings_for_unknown_code() {
        assert!(strings_for("fr").is_none());
        assert_eq!(strings_for("hi").map(|s| s.len()), Some(HINDI_STRINGS.len()));
    }
}
