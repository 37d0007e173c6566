//! Heuristic text vocabularies.
//!
//! All matching runs over *sanitized* text: lowercased, with everything but
//! alphanumerics stripped, so `Sign-In`, `sign_in` and `signin` collapse to
//! one token. The alternations cover the major languages the heuristics were
//! tuned on (en/fr/de/es/pt and friends).

use once_cell::sync::Lazy;
use regex::Regex;

/// Collapse text for heuristic matching: lowercase, alphanumerics only.
pub fn sanitize(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect()
}

macro_rules! vocab {
    ($name:ident, $pattern:expr) => {
        pub static $name: Lazy<Regex> =
            Lazy::new(|| Regex::new($pattern).expect(concat!("invalid vocab: ", stringify!($name))));
    };
}

vocab!(
    LOGIN_RE,
    r"(?:(?:n(?:ouvelleses|uevase|ewses)s|iniciarses|connex)io|anmeldedate|sign[io])n|in(?:iciarsessao|troduce)|a(?:uthenticate|nmeld(?:ung|en))|authentifier|s(?:econnect|identifi)er|novasessao|(?:introduci|conecta|entr[ae])r|prihlasit|connect|acceder|login"
);

vocab!(
    REGISTER_RE,
    r"kontoerstellen|cr(?:ea(?:teaccount|rcuenta)|iarconta)|(?:nouveaucompt|creeruncompt|s?inscrir|unirs)e|re(?:gist(?:r(?:ieren|arse|ar)|er)|joindre)|nuevacuenta|neueskonto|getstarted|newaccount|novaconta|(?:com(?:mence|eca)|(?:empez|junt)a)r|signup|join"
);

vocab!(
    RECOVERY_RE,
    r"(?:wiederherstell|zurucksetz)en|re(?:(?:initialis|stablec)er|(?:defini|staur[ae])r|c(?:uper[ae]|ove)r|set)|problem|(?:troubl|restor|aid)e|a[jy]uda|h(?:ilfe|elp)"
);

vocab!(
    TROUBLE_RE,
    r"schwierigkeit|(?:difficult|troubl|oubli|hilf)e|i(?:nciden(?:cia|t)|ssue)|vergessen|esquecido|olvidado|needhelp|questao|problem|forgot|ayuda"
);

vocab!(
    PASSWORD_RE,
    r"p(?:hrasesecrete|ass(?:(?:phras|cod)e|wor[dt]))|(?:c(?:havesecret|lavesecret|ontrasen)|deseguranc)a|(?:(?:zugangs|secret)cod|clesecret)e|codesecret|motdepasse|geheimnis|secret|heslo|senha|key"
);

vocab!(PASSWORD_OUTLIER_RE, r"socialsecurity|nationalid");

vocab!(
    USERNAME_RE,
    r"identi(?:fiant|ty)|u(?:tilisateur|s(?:ername|uario))|(?:identifi|benutz)er|(?:screen|nick)name|nutzername|(?:anmeld|handl)e|pseudo"
);

vocab!(
    USERNAME_ATTR_RE,
    r"identifyemail|(?:custom|us)erid|loginname|a(?:cc(?:ountid|t)|ppleid)|loginid"
);

vocab!(
    USERNAME_OUTLIER_RE,
    r"(?:nom(?:defamill|br)|tit[lr])e|(?:primeiro|sobre)nome|(?:company|middle|nach|vor)name|firstname|apellido|lastname|prenom"
);

vocab!(EMAIL_RE, r"co(?:urriel|rrei?o)|email");

vocab!(EMAIL_ATTR_RE, r"usermail");

vocab!(
    CREATE_ACTION_RE,
    r"erstellen|n(?:o(?:uveau|vo)|uevo|e[uw])|cr(?:e(?:a(?:te|r)|er)|iar)|set"
);

vocab!(
    RESET_ACTION_RE,
    r"(?:a(?:ktualisiere|nder)|zurucksetze)n|(?:re(?:initialise|stablece|defini)|mettreajou)r|a(?:ctualiz|tualiz|lter)ar|c(?:ambiar|hange)|update|reset"
);

vocab!(
    CONFIRM_ACTION_RE,
    r"digitarnovamente|v(?:olveraescribi|erifi(?:ca|e))r|saisiranouveau|(?:erneuteingeb|wiederhol|bestatig)en|verif(?:izieren|y)|re(?:pe(?:t[ei]r|at)|type)|confirm|again"
);

vocab!(
    CURRENT_VALUE_RE,
    r"(?:be(?:stehend|for)|vorherig|aktuell)e|exist(?:ente|ing)|pre(?:cedent|vious)|a(?:n(?:t(?:erior|igo)|cien)|ctu[ae]l|tual)|existant|dernier|current|(?:ultim|viej)o|(?:letz|al)te|last|old"
);

vocab!(
    REMEMBER_ACTION_RE,
    r"angemeldetbleiben|lembrardemim|micherinnern|sesouvenirde|re(?:cordarme|member|ster)|manterme|mantener|stay|keep"
);

vocab!(SEARCH_ACTION_RE, r"recherche|buscar|s(?:earch|uche)|query");

vocab!(
    TOS_RE,
    r"(?:datenschutzrichtlini|politicadeprivacidad|confidentialit|a(?:cknowledg|gre))e|nutzungsbedingungen|(?:consentimi?ent|ac(?:ue|o)rd)o|(?:einwillig|zustimm)ung|consentement|condi(?:cione|tion)s|term(?:osdeuso|inos|sof)|(?:privacida|understan)d|guideline|consent|p(?:riva|oli)cy|accord"
);

vocab!(MFA_ACTION_RE, r"enter(?:auth)?code|confirm|verify");

vocab!(
    MFA_RE,
    r"(?:authentifizierung|doisfatore|doispasso)s|(?:auth(?:entication)?cod|(?:securityc|codig)od|doubleetap|coded)e|(?:authentication|generator)app|(?:(?:authentifica|doublefac)teu|(?:(?:authentifika|doblefac|zweifak|twofac)t|aut(?:henticat|enticad))o)r|verifica(?:c(?:ion|ao)|tion)|multifa(?:ct(?:eu|o)|k?to)r|zweischritte|generadora|doblepaso|2(?:s(?:chritte|tep)|(?:etap[ae]|paso)s|fa)|twostep"
);

vocab!(
    MFA_ATTR_RE,
    r"phoneverification|(?:approvals|login)code|c(?:odeinput|hallenge)|two(?:factor|step)|twofa|tfa|[2m]fa"
);

vocab!(OTP_ATTR_RE, r"totp(?:pin)?|o(?:netime|t[cp])|1time");

vocab!(
    OTP_OUTLIER_RE,
    r"n(?:(?:ue|o)vocodigo|ouveaucode|e(?:usenden|(?:uer|w)code))|re(?:enviar|send)|envoyer|senden|enviar|send"
);

vocab!(OAUTH_ATTR_RE, r"facebook|twitch|google|apple");

vocab!(
    HIDDEN_ATTR_RE,
    r"s(?:creenreade)?ronly|(?:move)?offscreen|(?:displaynon|a11yhid)e|hidden"
);

/// Input `pattern` attributes typical of OTP fields.
pub const OTP_PATTERNS: [&str; 5] = [
    "d*",
    "d{6}",
    "[0-9]*",
    "[0-9]{6}",
    "([0-9a-fA-F]{5}-?[0-9a-fA-F]{5})",
];

/// Input types the classifier considers at all.
pub const VALID_INPUT_TYPES: [&str; 7] =
    ["text", "email", "number", "tel", "password", "hidden", "search"];

/// Hidden-input values that mark framework bookkeeping, not usernames.
pub const HIDDEN_IGNORE_VALUES: [&str; 4] = ["0", "1", "true", "false"];

#[cfg(test)]
#[path = "vocab_tests.rs"]
mod tests;
