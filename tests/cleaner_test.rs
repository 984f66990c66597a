use text_scrub::{
    clean_html_content, clean_news_title, extract_clean_text, is_valid_cleaned_content,
};

// --- clean_html_content ---

#[test]
fn test_clean_basic_html() {
    let cleaned = clean_html_content("<p>Hello <b>world</b> this is content</p>");
    assert_eq!(cleaned, "Hello world this is content");
}

#[test]
fn test_clean_empty_input() {
    assert_eq!(clean_html_content(""), "");
    assert_eq!(clean_html_content("   \n\t  "), "");
}

#[test]
fn test_clean_markup_only() {
    assert_eq!(clean_html_content("<div><span></span></div>"), "");
    assert_eq!(clean_html_content("<br/><hr>"), "");
}

#[test]
fn test_clean_cdata_wrapper() {
    let cleaned = clean_html_content("<![CDATA[<p>Wrapped content here</p>]]>");
    assert_eq!(cleaned, "Wrapped content here");
}

#[test]
fn test_clean_nested_structure() {
    let html = "<div><h2>Title</h2><p>Body text with <i>emphasis</i> and \
                <a href=\"https://example.com\">links</a></p></div>";
    assert_eq!(
        clean_html_content(html),
        "Title Body text with emphasis and links"
    );
}

#[test]
fn test_clean_inline_markup_preserves_text() {
    let cleaned = clean_html_content(
        "<p>This is a <strong>news</strong> article about \
         <a href=\"http://example.com\">technology</a>.</p>",
    );
    assert_eq!(cleaned, "This is a news article about technology.");
}

#[test]
fn test_clean_removes_script_and_style() {
    let html = "<p>Visible</p><script>var x = 1;</script>\
                <style>.a { color: red }</style><p>also readable text</p>";
    assert_eq!(clean_html_content(html), "Visible also readable text");
}

#[test]
fn test_clean_removes_comments() {
    let cleaned = clean_html_content("<p>Before</p><!-- hidden note --><p>and after text</p>");
    assert_eq!(cleaned, "Before and after text");
}

#[test]
fn test_clean_decodes_named_entities() {
    let cleaned = clean_html_content(
        "Apple&apos;s new product &amp; services &ndash; \
         &ldquo;revolutionary&rdquo; says CEO",
    );
    assert_eq!(
        cleaned,
        "Apple's new product & services - \"revolutionary\" says CEO"
    );
}

#[test]
fn test_clean_decodes_numeric_entities() {
    assert_eq!(
        clean_html_content("Caf&#233; costs &#x32;0 euros"),
        "Café costs 20 euros"
    );
}

#[test]
fn test_clean_drops_control_and_astral_entities() {
    // bell and emoji code points fall outside the decodable range
    assert_eq!(
        clean_html_content("Alert &#7; sounded &#128512; during testing"),
        "Alert sounded during testing"
    );
    assert_eq!(
        clean_html_content("Beep &#x07; and &#x1F600; are gone"),
        "Beep and are gone"
    );
}

#[test]
fn test_clean_drops_unknown_entities() {
    assert_eq!(
        clean_html_content("Text &unknownentity; more words here"),
        "Text more words here"
    );
}

#[test]
fn test_clean_removes_urls() {
    assert_eq!(
        clean_html_content("Check https://example.com/page for details"),
        "Check for details"
    );
    assert_eq!(clean_html_content("Visit www.example.com right away"), "Visit right away");
}

#[test]
fn test_clean_keeps_prose_around_removed_urls() {
    let cleaned = clean_html_content(
        "Read more at https://www.example.com/article or visit www.news.com for updates",
    );
    assert_eq!(cleaned, "Read more at or visit for updates");
}

#[test]
fn test_clean_removes_email_addresses() {
    assert_eq!(
        clean_html_content("Contact john.doe@example.com for info"),
        "Contact for info"
    );
}

#[test]
fn test_clean_strips_dash_attribution() {
    let cleaned = clean_html_content("This is a news article about technology. - Example News");
    assert_eq!(cleaned, "This is a news article about technology.");
}

#[test]
fn test_clean_strips_via_and_pipe_attribution() {
    assert_eq!(clean_html_content("Big launch day via TechCrunch"), "Big launch day");
    assert_eq!(
        clean_html_content("Economy grows steadily | Financial Times"),
        "Economy grows steadily"
    );
}

#[test]
fn test_clean_strips_byline_and_according_to() {
    assert_eq!(clean_html_content("Exclusive report by Jane Smith"), "Exclusive report");
    assert_eq!(
        clean_html_content("Markets fell sharply according to analysts"),
        "Markets fell sharply"
    );
}

#[test]
fn test_clean_strips_leading_dash() {
    assert_eq!(
        clean_html_content("- Quick update on the launch"),
        "Quick update on the launch"
    );
}

#[test]
fn test_clean_removes_trailing_cta() {
    assert_eq!(
        clean_html_content("Great article about rust development. Read more..."),
        "Great article about rust development."
    );
    assert_eq!(
        clean_html_content("The announcement covers three products. Continue reading"),
        "The announcement covers three products."
    );
}

#[test]
fn test_clean_normalizes_quotes_and_dashes() {
    let cleaned = clean_html_content("It\u{2019}s a \u{201C}big\u{201D} deal \u{2014} really");
    assert_eq!(cleaned, "It's a \"big\" deal - really");
}

#[test]
fn test_clean_strips_zero_width_characters() {
    let cleaned = clean_html_content("zero\u{200B}width\u{FEFF} chars removed here");
    assert_eq!(cleaned, "zerowidth chars removed here");

    let joined = clean_html_content("cross\u{200D}linked and non\u{200C}joined words stay");
    assert_eq!(joined, "crosslinked and nonjoined words stay");
}

#[test]
fn test_clean_collapses_whitespace() {
    let cleaned = clean_html_content("Too   many\n\nspaces\t\tbetween words");
    assert_eq!(cleaned, "Too many spaces between words");
}

#[test]
fn test_clean_truncates_long_content() {
    let long = format!("{} This should be truncated.", "A".repeat(600));
    let cleaned = clean_html_content(&long);
    assert_eq!(cleaned.chars().count(), 503);
    assert!(cleaned.ends_with("..."));
}

#[test]
fn test_clean_truncates_at_word_boundary() {
    let long = "alpha beta ".repeat(50);
    let cleaned = clean_html_content(&long);
    assert_eq!(cleaned.chars().count(), 497);
    assert!(cleaned.ends_with("beta..."));
}

#[test]
fn test_clean_is_idempotent() {
    let inputs = [
        "<p>This is a <strong>news</strong> article about technology.</p>",
        "Apple&apos;s new product &amp; services for the fall",
        "Read more at https://news.example.com or visit www.news.com for updates",
    ];
    for input in &inputs {
        let once = clean_html_content(input);
        let twice = clean_html_content(&once);
        assert_eq!(twice, once, "cleaning {input:?} twice changed the output");
    }
}

// --- clean_news_title ---

#[test]
fn test_title_plain_passthrough() {
    assert_eq!(
        clean_news_title("Breaking News: Market Update"),
        "Breaking News: Market Update"
    );
}

#[test]
fn test_title_strips_category_prefix() {
    assert_eq!(
        clean_news_title("[Tech] New framework released"),
        "New framework released"
    );
}

#[test]
fn test_title_strips_caps_suffix() {
    assert_eq!(
        clean_news_title("Local team wins championship - 9NEWS"),
        "Local team wins championship"
    );
}

#[test]
fn test_title_strips_source_suffix() {
    assert_eq!(
        clean_news_title("Quarterly results beat expectations - Example Daily"),
        "Quarterly results beat expectations"
    );
}

#[test]
fn test_title_cdata_and_entities() {
    assert_eq!(
        clean_news_title("<![CDATA[Apple &amp; Google face new rules]]>"),
        "Apple & Google face new rules"
    );
}

#[test]
fn test_title_strips_tags_without_unwrapping() {
    assert_eq!(
        clean_news_title("<b>Bold</b> claims in new report"),
        "Bold claims in new report"
    );
}

// --- extract_clean_text ---

#[test]
fn test_extract_plain_text_passthrough() {
    assert_eq!(
        extract_clean_text("Just a plain sentence with words"),
        "Just a plain sentence with words"
    );
}

#[test]
fn test_extract_delegates_when_tags_present() {
    assert_eq!(extract_clean_text("<p>Has <b>tags</b> inside</p>"), "Has tags inside");
}

#[test]
fn test_extract_decodes_entities_without_tags() {
    assert_eq!(
        extract_clean_text("Fish &amp; chips cost &pound;5 today"),
        "Fish & chips cost £5 today"
    );
}

#[test]
fn test_extract_removes_urls_without_tags() {
    assert_eq!(
        extract_clean_text("Details at https://example.org/post for everyone"),
        "Details at for everyone"
    );
}

// --- is_valid_cleaned_content ---

#[test]
fn test_validity_thresholds() {
    let cases = [
        ("This is a valid sentence with words", true),
        ("Hello, world! It's fine (really).", true),
        ("word word word", true),
        ("", false),
        ("Too short", false),
        ("123 456 789", false),
        ("@@@ ### $$$ %%%", false),
        ("ok go hi at we it", false),
    ];
    for (text, expected) in &cases {
        assert_eq!(
            is_valid_cleaned_content(text),
            *expected,
            "{text:?} should be valid={expected}"
        );
    }
}

#[test]
fn test_validity_of_cleaned_output() {
    let cleaned = clean_html_content("<p>A full sentence about something interesting.</p>");
    assert!(is_valid_cleaned_content(&cleaned));

    let debris = clean_html_content("<div>&gt;&gt;&gt;</div>");
    assert!(!is_valid_cleaned_content(&debris));
}
