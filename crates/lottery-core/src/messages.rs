//! Bundled locale (Arabic)
//!
//! All user-facing text lives here so frontends never hard-code strings.

// ----------------------------------------------------------------------------
// Validation and Upload Errors
// ----------------------------------------------------------------------------

pub const ENTER_VALID_VALUES: &str = "الرجاء إدخال قيم صحيحة في كلا الحقلين";
pub const NUMBERS_MUST_BE_POSITIVE: &str = "يجب أن تكون الأرقام أكبر من صفر";
pub const COUNT_EXCEEDS_TOTAL: &str =
    "عدد الأرقام المطلوب سحبها يجب أن يكون أقل من أو يساوي العدد الكلي";
pub const ENTER_ENTRIES_COUNT: &str = "الرجاء إدخال عدد الموظفين المراد سحبهم";
pub const COUNT_MUST_BE_POSITIVE: &str = "يجب أن يكون العدد أكبر من صفر";
pub const NO_ENTRIES_LOADED: &str = "الرجاء رفع ملف CSV للموظفين أولاً";
pub const CSV_ONLY: &str = "الرجاء رفع ملف CSV فقط";
pub const FILE_EMPTY: &str = "الملف فارغ";
pub const NO_VALID_NAMES: &str = "لم يتم العثور على أسماء صحيحة في الملف";
pub const DRAW_IN_PROGRESS: &str = "جاري السحب...";
pub const NOTHING_TO_EXPORT: &str = "لا توجد نتائج للتصدير";
pub const UNKNOWN_MODE: &str = "نوع القرعة غير معروف";
pub const INVALID_EXPORT: &str = "محتوى الملف المُصدَّر غير صالح";
pub const INVALID_CONFIG: &str = "إعدادات غير صالحة";

pub fn count_exceeds_entries(requested: u64, available: usize) -> String {
    format!(
        "عدد الموظفين المطلوب سحبهم ({}) يجب أن يكون أقل من أو يساوي العدد الكلي ({})",
        requested, available
    )
}

pub fn count_too_large(max: u64) -> String {
    format!("عدد السحب كبير جداً (الحد الأقصى {})", max)
}

// ----------------------------------------------------------------------------
// Labels
// ----------------------------------------------------------------------------

pub const NUMBERS_TITLE: &str = "قرعة الأرقام";
pub const ENTRIES_TITLE: &str = "قرعة الموظفين";
pub const START_DRAW: &str = "ابدأ القرعة";
pub const DRAWING: &str = "جاري السحب...";
pub const RESET: &str = "إعادة تعيين";
pub const EXPORT_CSV: &str = "تصدير CSV";
pub const NUMBERS_RESULTS_TITLE: &str = "نتائج القرعة";
pub const ENTRIES_RESULTS_TITLE: &str = "الموظفون الفائزون 🎉";

/// "N entries loaded successfully"
pub fn entries_loaded(count: usize) -> String {
    format!("تم تحميل {} موظف بنجاح ✓", count)
}

/// "Selected `drawn` numbers out of `total`"
pub fn numbers_summary(drawn: usize, total: &str) -> String {
    format!("تم اختيار {} رقم من أصل {}", drawn, total)
}

/// "Selected `drawn` entries out of `total`"
pub fn entries_summary(drawn: usize, total: usize) -> String {
    format!("تم اختيار {} موظف من أصل {}", drawn, total)
}

/// Hint under the entries count field
pub fn entries_count_hint(total: usize) -> String {
    format!("أدخل عدد الموظفين الفائزين (من 1 إلى {})", total)
}
