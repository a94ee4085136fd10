//! Declarative rule tables for the semantic matcher.
//!
//! Tables are plain data. Order matters: the first rule whose predicate holds
//! decides the key, so narrow rules come before broad ones (email before
//! address, state before country, education dates before work dates).

use jobfill_protocols::SemanticKey;
use jobfill_protocols::SemanticKey as K;

use self::Pattern::{AllOf, Contains, Exact, Word};

/// One predicate over a lowercased identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    /// The whole identifier.
    Exact(&'static str),
    /// A substring anywhere.
    Contains(&'static str),
    /// Every substring, in any order.
    AllOf(&'static [&'static str]),
    /// A token not glued to other letters ("city" in "home_city", not in
    /// "ethnicity").
    Word(&'static str),
}

impl Pattern {
    pub fn matches(&self, identifier: &str) -> bool {
        match self {
            Self::Exact(text) => identifier == *text,
            Self::Contains(text) => identifier.contains(text),
            Self::AllOf(parts) => parts.iter().all(|part| identifier.contains(part)),
            Self::Word(token) => contains_word(identifier, token),
        }
    }
}

fn contains_word(haystack: &str, token: &str) -> bool {
    haystack.match_indices(token).any(|(start, _)| {
        let before = haystack[..start].chars().next_back();
        let after = haystack[start + token.len()..].chars().next();
        !before.is_some_and(char::is_alphabetic) && !after.is_some_and(char::is_alphabetic)
    })
}

/// Patterns that resolve a field to one profile attribute.
#[derive(Debug, Clone, Copy)]
pub struct MatchRule {
    pub key: SemanticKey,
    /// Any pattern against any identifier satisfies the rule.
    pub patterns: &'static [Pattern],
    /// Any exclusion against any identifier vetoes it.
    pub excludes: &'static [Pattern],
}

impl MatchRule {
    pub fn matches(&self, identifiers: &[String]) -> bool {
        let hit = identifiers
            .iter()
            .any(|id| self.patterns.iter().any(|p| p.matches(id)));
        hit && !identifiers
            .iter()
            .any(|id| self.excludes.iter().any(|p| p.matches(id)))
    }
}

/// An ordered, named rule table.
#[derive(Debug)]
pub struct RuleSet {
    pub name: &'static str,
    pub rules: &'static [MatchRule],
}

impl RuleSet {
    /// First rule satisfied by the identifiers.
    pub fn first_match(&self, identifiers: &[String]) -> Option<&MatchRule> {
        self.rules.iter().find(|rule| rule.matches(identifiers))
    }
}

const fn rule(key: SemanticKey, patterns: &'static [Pattern]) -> MatchRule {
    MatchRule {
        key,
        patterns,
        excludes: &[],
    }
}

const fn rule_except(
    key: SemanticKey,
    patterns: &'static [Pattern],
    excludes: &'static [Pattern],
) -> MatchRule {
    MatchRule {
        key,
        patterns,
        excludes,
    }
}

/// Workday short identifiers and `group--name` automation ids.
pub static WORKDAY_RULES: RuleSet = RuleSet {
    name: "workday",
    rules: &[
        rule(
            K::FirstName,
            &[
                Exact("first"),
                Exact("firstname"),
                Exact("givenname"),
                Contains("--firstname"),
                Contains("name--first"),
            ],
        ),
        rule(
            K::LastName,
            &[
                Exact("last"),
                Exact("lastname"),
                Exact("familyname"),
                Contains("--lastname"),
                Contains("name--last"),
            ],
        ),
        rule(
            K::Email,
            &[
                Exact("email"),
                Exact("emailaddress"),
                Contains("--email"),
                Contains("workday.email"),
            ],
        ),
        rule(
            K::Phone,
            &[
                Exact("phone"),
                Exact("phonenumber"),
                Exact("phone-number"),
                Contains("--phonenumber"),
                Contains("contact--phone"),
            ],
        ),
        rule(
            K::Address,
            &[
                Exact("addressline1"),
                Exact("address1"),
                Contains("--addressline1"),
                Contains("address--line1"),
                Contains("location--address"),
            ],
        ),
        rule(K::City, &[Exact("city"), Contains("--city")]),
        // Before country: "address--countryRegion" is the state picker.
        rule(
            K::State,
            &[
                Exact("region"),
                Exact("countryregion"),
                Contains("--countryregion"),
                Contains("--region"),
            ],
        ),
        rule(K::ZipCode, &[Exact("postalcode"), Contains("--postalcode")]),
        rule(K::Country, &[Exact("country"), Contains("--country")]),
        rule(K::Linkedin, &[Contains("linkedin")]),
        rule(K::Website, &[Exact("website"), Contains("--website")]),
        rule(K::School, &[Exact("school"), Exact("schoolname"), Contains("--school")]),
        rule(K::Degree, &[Exact("degree"), Contains("--degree")]),
        rule(
            K::FieldOfStudy,
            &[Exact("fieldofstudy"), Contains("--fieldofstudy")],
        ),
        rule(
            K::Gpa,
            &[Exact("gpa"), Exact("gradeaverage"), Contains("--gpa"), Contains("--gradeaverage")],
        ),
        rule(K::CurrentJob, &[Contains("currentlyworkhere")]),
        rule(K::Company, &[Exact("company"), Exact("companyname"), Contains("--company")]),
        rule(
            K::JobTitle,
            &[Exact("jobtitle"), Exact("title"), Exact("position"), Contains("--jobtitle")],
        ),
        rule(
            K::Description,
            &[Exact("roledescription"), Contains("--roledescription")],
        ),
        rule(K::Skills, &[Exact("skills"), Contains("--skills")]),
        rule(
            K::Languages,
            &[Exact("language"), Exact("languages"), Contains("--language")],
        ),
    ],
};

const EDUCATION_CONTEXT: &[Pattern] = &[
    Contains("edu"),
    Contains("school"),
    Contains("college"),
    Contains("university"),
    Contains("graduat"),
];

/// Compound rules for arbitrary markup.
pub static GENERIC_RULES: RuleSet = RuleSet {
    name: "generic",
    rules: &[
        rule(
            K::FirstName,
            &[
                AllOf(&["first", "name"]),
                Contains("given name"),
                Contains("given-name"),
                Contains("given_name"),
                Contains("givenname"),
                Word("fname"),
            ],
        ),
        rule(
            K::LastName,
            &[
                AllOf(&["last", "name"]),
                Contains("surname"),
                Contains("family name"),
                Contains("family-name"),
                Contains("family_name"),
                Contains("familyname"),
                Word("lname"),
            ],
        ),
        rule(
            K::Email,
            &[Contains("email"), Contains("e-mail"), Contains("e_mail")],
        ),
        rule(
            K::FullName,
            &[
                Exact("name"),
                Contains("full name"),
                Contains("full-name"),
                Contains("full_name"),
                Contains("fullname"),
                Contains("your name"),
                Contains("legal name"),
            ],
        ),
        rule(
            K::Phone,
            &[
                Contains("phone"),
                Contains("telephone"),
                Contains("mobile"),
                Word("cell"),
                Word("tel"),
            ],
        ),
        rule(
            K::Linkedin,
            &[Contains("linkedin"), Contains("linked-in"), Contains("linked in")],
        ),
        rule(
            K::Website,
            &[
                Contains("website"),
                Contains("web site"),
                Contains("web-site"),
                Contains("portfolio"),
                Contains("personal site"),
                Contains("personal-site"),
                Contains("personalsite"),
            ],
        ),
        rule_except(
            K::Address,
            &[
                Contains("address"),
                Contains("street"),
                Contains("addressline"),
            ],
            &[Contains("email"), Contains("mail")],
        ),
        rule(K::City, &[Word("city"), Contains("cityname"), Word("town")]),
        rule(
            K::State,
            &[Word("state"), Contains("province"), Word("region")],
        ),
        rule(
            K::ZipCode,
            &[
                Word("zip"),
                Contains("zipcode"),
                Contains("zip code"),
                Contains("zip_code"),
                Contains("postal"),
                Contains("postcode"),
            ],
        ),
        rule(K::Country, &[Contains("country"), Word("nation")]),
        rule(
            K::Summary,
            &[
                Contains("summary"),
                Contains("cover letter"),
                Contains("cover_letter"),
                Contains("coverletter"),
                Contains("about me"),
                Contains("about yourself"),
                Word("bio"),
                Contains("biography"),
            ],
        ),
        rule(
            K::EducationStartDate,
            &[
                AllOf(&["edu", "start"]),
                AllOf(&["school", "start"]),
                AllOf(&["college", "start"]),
                AllOf(&["university", "start"]),
                Contains("enrollment date"),
            ],
        ),
        rule(
            K::EducationEndDate,
            &[
                AllOf(&["edu", "end"]),
                AllOf(&["school", "end"]),
                AllOf(&["college", "end"]),
                AllOf(&["university", "end"]),
                Contains("graduation"),
                Contains("completion year"),
            ],
        ),
        rule(
            K::CurrentEducation,
            &[
                Contains("currently studying"),
                Contains("currently enrolled"),
                Contains("current student"),
                AllOf(&["current", "edu"]),
                AllOf(&["current", "school"]),
            ],
        ),
        rule_except(
            K::WorkStartDate,
            &[
                AllOf(&["start", "date"]),
                Contains("from date"),
                Contains("from_date"),
                Contains("date from"),
            ],
            EDUCATION_CONTEXT,
        ),
        rule_except(
            K::WorkEndDate,
            &[
                AllOf(&["end", "date"]),
                Contains("to date"),
                Contains("to_date"),
                Contains("date to"),
            ],
            EDUCATION_CONTEXT,
        ),
        rule_except(
            K::CurrentJob,
            &[
                Contains("current job"),
                Contains("current_job"),
                Contains("currentjob"),
                Contains("current position"),
                Contains("current role"),
                Contains("currently work"),
                Contains("currently employed"),
                Contains("present job"),
            ],
            &[Contains("title"), Contains("company"), Contains("employer")],
        ),
        rule(
            K::Company,
            &[
                Contains("company"),
                Contains("employer"),
                Contains("organization"),
                Contains("organisation"),
                Contains("workplace"),
                Word("firm"),
            ],
        ),
        rule(
            K::JobTitle,
            &[
                Contains("job title"),
                Contains("job-title"),
                Contains("job_title"),
                Contains("jobtitle"),
                Contains("job role"),
                Contains("position"),
                Contains("occupation"),
                Exact("title"),
                Exact("role"),
            ],
        ),
        rule(
            K::Description,
            &[
                Exact("description"),
                Contains("job description"),
                Contains("role description"),
                Contains("work description"),
                Contains("responsibilit"),
                Contains("duties"),
            ],
        ),
        rule(
            K::School,
            &[
                Contains("school"),
                Contains("university"),
                Contains("college"),
                Contains("institution"),
                Contains("alma mater"),
            ],
        ),
        rule(
            K::Degree,
            &[Contains("degree"), Contains("qualification"), Contains("diploma")],
        ),
        rule(
            K::FieldOfStudy,
            &[
                Contains("field of study"),
                Contains("field-of-study"),
                Contains("field_of_study"),
                Contains("fieldofstudy"),
                Word("major"),
                Contains("concentration"),
                Contains("specialization"),
                Contains("discipline"),
            ],
        ),
        rule(K::Gpa, &[Word("gpa"), Contains("grade point")]),
        rule(K::Skills, &[Word("skills"), Word("skill"), Contains("expertise")]),
        rule(K::Languages, &[Contains("language")]),
    ],
};
