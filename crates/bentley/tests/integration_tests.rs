use bentley::*;

#[test]
fn test_level_functions_accept_multiline_messages() {
  let message = "Basement\nMusty\nDamp";
  info(message);
  warn(message);
  error(message);
  debug(message);
  success(message);
}

#[test]
fn test_macros_format_their_arguments() {
  let location = "Kitchen";
  bentley::info!("Loaded {} smells for {location}", 3);
  bentley::success!("Done");
}

#[test]
fn test_error_banner_wraps_message() {
  let lines = banner_lines("Failed to fetch results", 10, '!');
  assert_eq!(lines.first().map(String::as_str), Some("!!!!!!!!!!"));
  assert_eq!(lines[1], "Failed to fetch results");
  error_banner("Failed to fetch results");
}
