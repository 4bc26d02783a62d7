//! AOC HTTP client implementation

use crate::classifier::{ResponseClassifier, SubmissionOutcome};
use crate::error::ClientError;
use reqwest::header::HeaderValue;
use std::time::Duration;
use zeroize::Zeroize;

/// User-agent sent with every request so the site can identify the tool
pub const USER_AGENT: &str = "github.com/aoc-plugin/aoc-plugin (reqwest)";

/// Default timeout applied to every request; keeps a stalled connection
/// from blocking the host indefinitely
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// The main AOC HTTP client
///
/// This client provides methods for interacting with the Advent of Code
/// website: fetching puzzle input and submitting answers.
///
/// # Example
///
/// ```no_run
/// use aoc_client::AocClient;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let client = AocClient::new()?;
/// let session = "your_session_cookie";
///
/// // Fetch input
/// let input = client.get_input(2024, 1, session)?;
/// println!("Input: {}", input);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct AocClient {
    client: reqwest::blocking::Client,
    base_url: reqwest::Url,
    classifier: ResponseClassifier,
}

impl AocClient {
    /// Create a new AOC client with rustls-tls configuration and a bounded
    /// request timeout
    ///
    /// # Errors
    ///
    /// Returns `ClientError::ClientInit` if the HTTP client cannot be
    /// initialized.
    ///
    /// # Example
    ///
    /// ```
    /// use aoc_client::AocClient;
    ///
    /// let client = AocClient::new().expect("Failed to create client");
    /// ```
    pub fn new() -> Result<Self, ClientError> {
        Self::builder().build()
    }

    /// Create a builder for configuring the AOC client
    ///
    /// # Example
    ///
    /// ```no_run
    /// use aoc_client::AocClient;
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = AocClient::builder()
    ///     .base_url("http://localhost:1234")?
    ///     .build()?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn builder() -> AocClientBuilder {
        AocClientBuilder::new()
    }

    /// Create a secure cookie header value from a session string
    ///
    /// This function creates a HeaderValue with the sensitive flag set to true
    /// and zeroizes the temporary string after use.
    fn create_cookie_header(session: &str) -> Result<HeaderValue, ClientError> {
        let mut cookie_string = format!("session={}", session);
        let header_value = HeaderValue::from_bytes(cookie_string.as_bytes())
            .map_err(|_| ClientError::ClientInit("Invalid session cookie format".to_string()))?;

        // Mark as sensitive and zeroize the temporary string
        let mut sensitive_header = header_value;
        sensitive_header.set_sensitive(true);
        cookie_string.zeroize();

        Ok(sensitive_header)
    }

    /// Build a puzzle endpoint URL: `/{year}/day/{day}/{leaf}`
    fn puzzle_url(&self, year: u16, day: u8, leaf: &str) -> Result<reqwest::Url, ClientError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::ClientInit("Cannot modify base URL path".to_string()))?
            .clear()
            .extend(&[&year.to_string(), "day", &day.to_string(), leaf]);
        Ok(url)
    }

    /// Fetch puzzle input for a specific year and day
    ///
    /// Downloads the personalized puzzle input for the given year and day.
    ///
    /// # Arguments
    ///
    /// * `year` - The AOC year (e.g., 2024)
    /// * `day` - The day number (1-25)
    /// * `session` - The session cookie value (without "session=" prefix)
    ///
    /// # Returns
    ///
    /// The puzzle input as a UTF-8 string, byte-for-byte as the site sent it.
    ///
    /// # Errors
    ///
    /// * `ClientError::Request` - Network error
    /// * `ClientError::InvalidStatus` - HTTP error (e.g., 404 if puzzle not available)
    /// * `ClientError::Encoding` - Response is not valid UTF-8
    ///
    /// # Example
    ///
    /// ```no_run
    /// use aoc_client::AocClient;
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = AocClient::new()?;
    /// let session = "your_session_cookie";
    ///
    /// let input = client.get_input(2024, 1, session)?;
    /// println!("Input length: {} bytes", input.len());
    /// # Ok(())
    /// # }
    /// ```
    pub fn get_input(&self, year: u16, day: u8, session: &str) -> Result<String, ClientError> {
        let cookie_header = Self::create_cookie_header(session)?;
        let url = self.puzzle_url(year, day, "input")?;

        let response = self
            .client
            .get(url)
            .header("Cookie", cookie_header)
            .send()?;

        if !response.status().is_success() {
            return Err(ClientError::InvalidStatus {
                status: response.status(),
            });
        }

        response.text().map_err(|_| ClientError::Encoding)
    }

    /// Submit an answer for a puzzle part
    ///
    /// Posts `level=<part>&answer=<answer>` as a URL-encoded form and
    /// classifies the response body. The answer is trimmed before
    /// submission; the part must be 1 or 2 and is validated before any
    /// request is constructed.
    ///
    /// # Arguments
    ///
    /// * `year` - The AOC year (e.g., 2024)
    /// * `day` - The day number (1-25)
    /// * `part` - The part number (1 or 2)
    /// * `answer` - The answer to submit (as a string)
    /// * `session` - The session cookie value
    ///
    /// # Returns
    ///
    /// A [`SubmissionOutcome`] describing what the site said:
    /// * `Correct` - Answer was correct
    /// * `Incorrect` - Answer was incorrect
    /// * `RateLimited` - Submission was throttled (includes the stated wait
    ///   time when the response carried one)
    /// * `Unrecognized` - Response matched no known pattern; carries the raw
    ///   body for diagnostics
    ///
    /// # Errors
    ///
    /// * `ClientError::InvalidPart` - Part is not 1 or 2 (no request is made)
    /// * `ClientError::Request` - Network error
    /// * `ClientError::InvalidStatus` - HTTP error
    /// * `ClientError::Encoding` - Response is not valid UTF-8
    ///
    /// # Example
    ///
    /// ```no_run
    /// use aoc_client::{AocClient, SubmissionOutcome};
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = AocClient::new()?;
    /// let session = "your_session_cookie";
    ///
    /// let outcome = client.submit_answer(2024, 1, 1, "42", session)?;
    /// match outcome {
    ///     SubmissionOutcome::Correct => println!("Correct!"),
    ///     SubmissionOutcome::Incorrect => println!("Try again"),
    ///     SubmissionOutcome::RateLimited { wait } => {
    ///         println!("Wait: {:?}", wait);
    ///     }
    ///     SubmissionOutcome::Unrecognized(body) => {
    ///         println!("Unexpected: {}", body);
    ///     }
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub fn submit_answer(
        &self,
        year: u16,
        day: u8,
        part: u8,
        answer: &str,
        session: &str,
    ) -> Result<SubmissionOutcome, ClientError> {
        if !(1..=2).contains(&part) {
            return Err(ClientError::InvalidPart(part));
        }

        let cookie_header = Self::create_cookie_header(session)?;
        let url = self.puzzle_url(year, day, "answer")?;

        let form = [
            ("level", part.to_string()),
            ("answer", answer.trim().to_string()),
        ];

        let response = self
            .client
            .post(url)
            .header("Cookie", cookie_header)
            .form(&form)
            .send()?;

        if !response.status().is_success() {
            return Err(ClientError::InvalidStatus {
                status: response.status(),
            });
        }

        let body = response.text().map_err(|_| ClientError::Encoding)?;
        Ok(self.classifier.classify(&body))
    }
}

/// Builder for configuring an AOC HTTP client
///
/// This builder allows customization of the base URL and HTTP client
/// configuration while ensuring the identifying user-agent is always set.
///
/// # Example
///
/// ```no_run
/// use aoc_client::AocClient;
/// use std::time::Duration;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// // Default client
/// let client = AocClient::builder().build()?;
///
/// // Custom base URL for testing
/// let client = AocClient::builder()
///     .base_url("http://localhost:1234")?
///     .build()?;
///
/// // Custom timeout
/// let client = AocClient::builder()
///     .client_builder(
///         reqwest::blocking::Client::builder()
///             .timeout(Duration::from_secs(10))
///     )
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct AocClientBuilder {
    base_url: Option<reqwest::Url>,
    client_builder: Option<reqwest::blocking::ClientBuilder>,
}

impl AocClientBuilder {
    /// Create a new builder with default settings
    pub fn new() -> Self {
        Self {
            base_url: None,
            client_builder: None,
        }
    }

    /// Set a custom base URL for the client
    ///
    /// This is useful for testing with mock servers. The URL is parsed and
    /// validated at builder time, catching errors early.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be parsed.
    pub fn base_url(mut self, url: impl reqwest::IntoUrl) -> Result<Self, ClientError> {
        self.base_url = Some(url.into_url()?);
        Ok(self)
    }

    /// Set a custom HTTP client builder
    ///
    /// This allows full customization of the HTTP client (timeouts, proxies,
    /// etc.). The user-agent will always be overridden to [`USER_AGENT`]
    /// regardless of the provided builder configuration.
    pub fn client_builder(mut self, builder: reqwest::blocking::ClientBuilder) -> Self {
        self.client_builder = Some(builder);
        self
    }

    /// Build the AOC client with the configured settings
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn build(self) -> Result<AocClient, ClientError> {
        // Use provided base URL or default to adventofcode.com
        let base_url = self.base_url.unwrap_or_else(|| {
            reqwest::Url::parse("https://adventofcode.com")
                .expect("Default base URL should always be valid")
        });

        // Use provided client builder or create default with rustls-tls
        // and a bounded timeout
        let builder = self.client_builder.unwrap_or_else(|| {
            reqwest::blocking::Client::builder()
                .use_rustls_tls()
                .timeout(DEFAULT_TIMEOUT)
        });

        // Always set the identifying user-agent
        let client = builder
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ClientError::ClientInit(e.to_string()))?;

        Ok(AocClient {
            client,
            base_url,
            classifier: ResponseClassifier::new(),
        })
    }
}

impl Default for AocClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn client_for(server: &mockito::Server) -> AocClient {
        AocClient::builder()
            .base_url(server.url())
            .unwrap()
            .build()
            .unwrap()
    }

    #[test]
    fn test_default_base_url() {
        let client = AocClient::builder().build().unwrap();
        assert_eq!(client.base_url.as_str(), "https://adventofcode.com/");
    }

    #[test]
    fn test_custom_base_url() {
        let client = AocClient::builder()
            .base_url("http://localhost:8080")
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(client.base_url.as_str(), "http://localhost:8080/");
    }

    #[test]
    fn test_unparseable_base_url_is_rejected() {
        assert!(AocClient::builder().base_url("not a valid url").is_err());
    }

    #[test]
    fn test_custom_client_builder() {
        // A caller-supplied builder still gets the fixed user-agent applied
        let custom = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(5))
            .use_rustls_tls();

        let result = AocClient::builder().client_builder(custom).build();
        assert!(result.is_ok());
    }

    #[test]
    fn test_request_headers() {
        let mut server = mockito::Server::new();

        // Both the session cookie and the identifying user-agent must be
        // present on every request
        let mock = server
            .mock("GET", "/2024/day/1/input")
            .match_header("cookie", "session=abc123")
            .match_header("user-agent", USER_AGENT)
            .with_status(200)
            .with_body("1721\n979\n")
            .expect(1)
            .create();

        let client = client_for(&server);
        let input = client.get_input(2024, 1, "abc123").unwrap();
        assert_eq!(input, "1721\n979\n");
        mock.assert();
    }

    #[test]
    fn test_non_success_status_surfaces_code() {
        let mut server = mockito::Server::new();

        // One endpoint per status so the mocks cannot shadow each other
        for (day, status) in [(9u8, 400usize), (10, 404), (11, 500)] {
            let mock = server
                .mock("GET", format!("/2024/day/{}/input", day).as_str())
                .with_status(status)
                .with_body("nope")
                .expect(1)
                .create();

            let client = client_for(&server);
            match client.get_input(2024, day, "tok") {
                Err(ClientError::InvalidStatus { status: got }) => {
                    assert_eq!(got.as_u16() as usize, status);
                }
                other => panic!("expected InvalidStatus for {}, got {:?}", status, other),
            }
            mock.assert();
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(10))]

        // The input endpoint is /{year}/day/{day}/input and the body comes
        // back untouched.
        #[test]
        fn prop_get_input_path_and_body(
            year in 2015u16..2030u16,
            day in 1u8..=25u8,
        ) {
            let mut server = mockito::Server::new();
            let mock = server
                .mock("GET", format!("/{}/day/{}/input", year, day).as_str())
                .with_status(200)
                .with_body("3   4\n4   3\n")
                .expect(1)
                .create();

            let client = client_for(&server);
            let input = client.get_input(year, day, "tok").unwrap();

            mock.assert();
            prop_assert_eq!(input, "3   4\n4   3\n");
        }

        // Submissions post level/answer to /{year}/day/{day}/answer, with
        // the answer stripped of the newline a buffer line carries.
        #[test]
        fn prop_submit_form_and_path(
            year in 2015u16..2030u16,
            day in 1u8..=25u8,
            part in 1u8..=2u8,
            answer in "[0-9]{1,10}",
        ) {
            let mut server = mockito::Server::new();
            let mock = server
                .mock("POST", format!("/{}/day/{}/answer", year, day).as_str())
                .match_body(mockito::Matcher::AllOf(vec![
                    mockito::Matcher::UrlEncoded("level".into(), part.to_string()),
                    mockito::Matcher::UrlEncoded("answer".into(), answer.clone()),
                ]))
                .with_status(200)
                .with_body("<main>That's the right answer!</main>")
                .expect(1)
                .create();

            let client = client_for(&server);
            let outcome = client
                .submit_answer(year, day, part, &format!("  {}\n", answer), "tok")
                .unwrap();

            mock.assert();
            prop_assert_eq!(outcome, SubmissionOutcome::Correct);
        }
    }

    #[test]
    fn test_submit_rejects_out_of_range_part() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", mockito::Matcher::Any)
            .expect(0)
            .create();

        let client = client_for(&server);
        for part in [0u8, 3, 5, 255] {
            match client.submit_answer(2024, 1, part, "42", "tok") {
                Err(ClientError::InvalidPart(p)) => assert_eq!(p, part),
                other => panic!("expected InvalidPart for {}, got {:?}", part, other),
            }
        }
        // The invalid part never reaches the wire
        mock.assert();
    }

    #[test]
    fn test_submission_outcome_from_body() {
        let mut server = mockito::Server::new();

        let mock = server
            .mock("POST", "/2024/day/3/answer")
            .with_status(200)
            .with_body("<main>You gave an answer too recently. You have 3m 27s left to wait.</main>")
            .expect(1)
            .create();

        let client = client_for(&server);
        let outcome = client.submit_answer(2024, 3, 1, "42", "abc").unwrap();
        assert_eq!(
            outcome,
            SubmissionOutcome::RateLimited {
                wait: Some(Duration::from_secs(207)),
            }
        );
        mock.assert();
    }
}
