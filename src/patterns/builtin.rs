//! Builtin extraction rule set and taxonomy
//!
//! The curated rule data shipped with the crate: vulnerability types keyed to
//! CWE terminology, vendor/product names from CPE conventions, component
//! types, and CVSS-style privilege levels. Rule files passed on the command
//! line replace this set entirely; the builtin data is just the default
//! configuration, expressed as fixed tables so declaration order (the final
//! conflict tie-break) is explicit.

use super::{
    Category, Predicate, RefinementConfig, RuleConfig, RuleOptions, RulesConfig, TaxonomyConfig,
    TaxonomyEntry,
};

// Vulnerability types (CWE vocabulary), tier 100
const VULN_RULES: &[(&str, &str)] = &[
    // Web application
    (r"\bXSS\b|\bcross.?site scripting\b", "CrossSiteScripting"),
    (r"\bSQLi?\b|\bSQL injection\b", "SQLInjection"),
    (r"\bCSRF\b|\bcross.?site request forgery\b", "CSRF"),
    (r"\bSSRF\b|\bserver.?side request forgery\b", "SSRF"),
    (r"\bXXE\b|\bXML external entity\b", "XXE"),
    (r"\bLFI\b|\blocal file inclusion\b", "LocalFileInclusion"),
    (r"\bRFI\b|\bremote file inclusion\b", "RemoteFileInclusion"),
    (r"\bopen redirect\b", "OpenRedirect"),
    (r"\bCRLF injection\b", "CRLFInjection"),
    (
        r"\bSSTI\b|\bserver.?side template injection\b",
        "ServerSideTemplateInjection",
    ),
    (r"\bHTTP header injection\b", "HTTPHeaderInjection"),
    (r"\bHTTP response splitting\b", "HTTPResponseSplitting"),
    // Authentication / authorization
    (r"\bauthn?\b|\bauthentication bypass\b", "AuthenticationBypass"),
    (r"\bsession fixation\b", "SessionFixation"),
    (
        r"\binsecure direct object reference\b",
        "InsecureDirectObjectReference",
    ),
    (r"\bweak password policy\b", "WeakPasswordPolicy"),
    (r"\bcredential stuffing\b", "CredentialStuffing"),
    (r"\bbrute force\b", "BruteForceAttack"),
    // Memory corruption
    (r"\bbuffer overflow\b", "BufferOverflow"),
    (r"\bheap overflow\b", "HeapOverflow"),
    (r"\bstack overflow\b", "StackOverflow"),
    (r"\buse.?after.?free\b", "UseAfterFree"),
    (r"\bdouble free\b", "DoubleFree"),
    (r"\bmemory leak\b", "MemoryLeak"),
    (r"\bwild pointer\b", "WildPointer"),
    // Injection
    (r"\bcommand injection\b", "CommandInjection"),
    (r"\bOS command injection\b", "OSCommandInjection"),
    (r"\bLDAP injection\b", "LDAPInjection"),
    (r"\bXPath injection\b", "XPathInjection"),
    (r"\bmail command injection\b", "MailCommandInjection"),
    // Configuration
    (r"\bmisconfiguration\b", "Misconfiguration"),
    (r"\bdefault credentials\b", "DefaultCredentials"),
    (r"\bdebug mode enabled\b", "DebugModeEnabled"),
    (r"\bbackdoor\b", "Backdoor"),
    // Cloud / container
    (r"\bcontainer escape\b", "ContainerEscape"),
    (r"\bprivilege escalation\b", "PrivilegeEscalation"),
    (r"\bIAM misconfiguration\b", "IAMMisconfiguration"),
    (r"\bunauthenticated access\b", "UnauthenticatedAccess"),
    (r"\bexposed (API|endpoint)\b", "ExposedAPI"),
    // Network
    (r"\bman.?in.?the.?middle\b|\bMITM\b", "ManInTheMiddle"),
    (r"\bDNS spoofing\b", "DNSSpoofing"),
    (r"\bARP spoofing\b", "ARPSpoofing"),
    (r"\bIP spoofing\b", "IPSpoofing"),
    (r"\bBGP hijacking\b", "BGPHijacking"),
    // Cryptographic
    (r"\bweak (crypto|encryption)\b", "WeakCryptography"),
    (r"\bweak SSL\b", "WeakSSL"),
    (r"\bself-signed certificate\b", "SelfSignedCertificate"),
    (r"\bcertificate verification\b", "CertificateVerification"),
    (r"\binsufficient entropy\b", "InsufficientEntropy"),
    // Protocol
    (r"\bHTTP request smuggling\b", "HTTPRequestSmuggling"),
    (r"\bDNS cache poisoning\b", "DNSCachePoisoning"),
    (r"\bNTP amplification\b", "NTPAmplification"),
    (r"\bSMTP injection\b", "SMTPInjection"),
    // Hardware / firmware
    (r"\bSpectre\b", "Spectre"),
    (r"\bMeltdown\b", "Meltdown"),
    (r"\bRowhammer\b", "Rowhammer"),
    (r"\bCold Boot\b", "ColdBoot"),
    // Windows
    (r"\bDLL hijacking\b", "DLLHijacking"),
    (r"\bDLL injection\b", "DLLInjection"),
    (
        r"\bWindows privilege escalation\b",
        "WindowsPrivilegeEscalation",
    ),
    // Linux
    (r"\bLinux privilege escalation\b", "LinuxPrivilegeEscalation"),
    (r"\bsymlink attack\b", "SymlinkAttack"),
    (r"\bTOCTOU\b", "TOCTOU"),
    // Mobile
    (r"\bAndroid intent hijacking\b", "AndroidIntentHijacking"),
    (r"\biOS jailbreak\b", "iOSJailbreak"),
    (r"\bmobile MITM\b", "MobileMITM"),
];

// Vendor/product names (CPE vocabulary), tier 90, version-capturing
const PRODUCT_RULES: &[(&str, &str)] = &[
    // Network security vendors
    (r"\bPalo Alto Networks\b|\bPAN-OS\b", "PaloAlto_PAN-OS"),
    (r"\bCisco\b", "Cisco"),
    (r"\bFortinet\b|\bFortiOS\b", "Fortinet_FortiOS"),
    (r"\bCheck Point\b", "CheckPoint"),
    (r"\bJuniper\b|\bJunos\b", "Juniper_Junos"),
    // Web servers
    (r"\bApache\b", "Apache"),
    (r"\bNginx\b", "Nginx"),
    (r"\bIIS\b", "IIS"),
    (r"\bTomcat\b", "Tomcat"),
    (r"\bJetty\b", "Jetty"),
    // Databases
    (r"\bMySQL\b", "MySQL"),
    (r"\bPostgreSQL\b|\bPostgres\b", "PostgreSQL"),
    (r"\bMongoDB\b", "MongoDB"),
    (r"\bOracle\b", "OracleDB"),
    (r"\bSQL Server\b", "SQLServer"),
    (r"\bRedis\b", "Redis"),
    (r"\bCassandra\b", "Cassandra"),
    // Cloud providers
    (r"\bAWS\b", "AWS"),
    (r"\bAzure\b", "Azure"),
    (r"\bGCP\b|\bGoogle Cloud\b", "GCP"),
    (r"\bKubernetes\b|\bk8s\b", "Kubernetes"),
    (r"\bDocker\b", "Docker"),
    (r"\bOpenShift\b", "OpenShift"),
    // Operating systems
    (r"\bLinux kernel\b", "Linux_Kernel"),
    (r"\bWindows\b", "Windows"),
    (r"\bmacOS\b", "macOS"),
    (r"\bAndroid\b", "Android"),
    (r"\biOS\b", "iOS"),
    // Languages / frameworks
    (r"\bPHP\b", "PHP"),
    (r"\bPython\b", "Python"),
    (r"\bJava\b", "Java"),
    (r"\bNode\.?js\b", "NodeJS"),
    (r"\b\.NET\b", "DotNet"),
    (r"\bDjango\b", "Django"),
    (r"\bSpring\b", "SpringFramework"),
    (r"\bRuby on Rails\b", "RubyOnRails"),
    (r"\bLaravel\b", "Laravel"),
    // Browsers
    (r"\bChrome\b", "Chrome"),
    (r"\bFirefox\b", "Firefox"),
    (r"\bSafari\b", "Safari"),
    (r"\bEdge\b", "Edge"),
    (r"\bInternet Explorer\b|\bIE\b", "InternetExplorer"),
    // CMS / e-commerce
    (r"\bWordPress\b", "WordPress"),
    (r"\bDrupal\b", "Drupal"),
    (r"\bJoomla\b", "Joomla"),
    (r"\bMagento\b", "Magento"),
    (r"\bShopify\b", "Shopify"),
    // Networking equipment
    (r"\bRouterOS\b", "MikroTik_RouterOS"),
    (r"\bASA\b", "Cisco_ASA"),
    (r"\bIOS\b", "Cisco_IOS"),
    (r"\bNX-OS\b", "Cisco_NX-OS"),
    // Security products
    (r"\bSophos\b", "Sophos"),
    (r"\bMcAfee\b", "McAfee"),
    (r"\bSymantec\b", "Symantec"),
    (r"\bTrend Micro\b", "TrendMicro"),
    // Virtualization
    (r"\bVMware\b", "VMware"),
    (r"\bHyper-V\b", "HyperV"),
    (r"\bKVM\b", "KVM"),
    (r"\bXen\b", "Xen"),
    // IoT
    (r"\bIoT device\b", "IoT_Device"),
    (r"\bIP camera\b", "IP_Camera"),
    (r"\bNAS\b", "NAS_Device"),
    (r"\bRouter\b", "Router"),
    (r"\bSmart TV\b", "SmartTV"),
];

// Component types (ATT&CK-flavored vocabulary), tier 80
const COMPONENT_RULES: &[(&str, &str)] = &[
    (r"\bpanorama appliances?\b", "NetworkAppliance"),
    (r"\bweb interface\b", "WebInterface"),
    (r"\badmin panel\b", "AdminPanel"),
    (r"\bAPI\b", "API"),
    (r"\bbrowser\b", "WebBrowser"),
    (r"\bserver\b", "Server"),
    (r"\bclient\b", "Client"),
    (r"\bdatabase\b", "Database"),
    (r"\bcloud instance\b", "CloudInstance"),
    (r"\bcontainer\b", "Container"),
    (r"\bvirtual machine\b|\bVM\b", "VirtualMachine"),
    (r"\bmicroservice\b", "Microservice"),
    (r"\bendpoint\b", "Endpoint"),
    (r"\bfirewall\b", "Firewall"),
    (r"\bproxy\b", "Proxy"),
    (r"\bgateway\b", "Gateway"),
    (r"\bload balancer\b", "LoadBalancer"),
    (r"\bauthentication service\b", "AuthService"),
    (r"\bpayment gateway\b", "PaymentGateway"),
    (r"\bmessage queue\b", "MessageQueue"),
    (r"\bcache\b", "Cache"),
    (r"\bCDN\b", "CDN"),
    (r"\bDNS server\b", "DNSServer"),
    (r"\bmail server\b", "MailServer"),
    (r"\bVPN\b", "VPN"),
];

// Privilege levels (CVSS vocabulary), tier 70
const PRIVILEGE_RULES: &[(&str, &str)] = &[
    (r"\bauthenticated\b", "AuthenticatedUser"),
    (r"\badmin\b|\badministrator\b", "Administrator"),
    (r"\bread.?write\b", "ReadWriteAccess"),
    (r"\broot\b", "RootAccess"),
    (r"\bprivileged\b", "PrivilegedUser"),
    (r"\bsuperuser\b", "Superuser"),
    (r"\bsystem\b", "System"),
    (r"\bnetwork\b", "NetworkAdmin"),
    (r"\bdomain admin\b", "DomainAdmin"),
    (r"\bguest\b", "Guest"),
    (r"\banonymous\b", "Anonymous"),
    (r"\bremote user\b", "RemoteUser"),
    (r"\blocal user\b", "LocalUser"),
    (r"\bservice account\b", "ServiceAccount"),
    (r"\bAPI user\b", "APIUser"),
];

// Subsumption taxonomy: canonical label -> parent class
const TAXONOMY: &[(&str, &str)] = &[
    ("CrossSiteScripting", "ClientSideAttack"),
    ("SQLInjection", "DatabaseAttack"),
    ("BufferOverflow", "MemoryCorruption"),
    ("HeapOverflow", "MemoryCorruption"),
    ("StackOverflow", "MemoryCorruption"),
    ("UseAfterFree", "MemoryCorruption"),
    ("DoubleFree", "MemoryCorruption"),
    ("CommandInjection", "InjectionAttack"),
    ("OSCommandInjection", "InjectionAttack"),
    ("LDAPInjection", "InjectionAttack"),
    ("XPathInjection", "InjectionAttack"),
    ("CRLFInjection", "InjectionAttack"),
    ("SMTPInjection", "InjectionAttack"),
    ("CSRF", "ClientSideAttack"),
    ("JavaScriptInjection", "ClientSideAttack"),
];

/// Builtin rule set: every category table flattened into declaration order,
/// vulnerability rules first so they also win the final tie-break.
pub fn builtin_rules() -> RulesConfig {
    let mut rule = Vec::new();
    push_rules(&mut rule, VULN_RULES, Category::VulnerabilityType, "CWE", false, "vuln");
    push_rules(&mut rule, PRODUCT_RULES, Category::Product, "CPE", true, "prod");
    push_rules(&mut rule, COMPONENT_RULES, Category::Component, "ATTACK", false, "comp");
    push_rules(&mut rule, PRIVILEGE_RULES, Category::Privilege, "CVSS", false, "priv");

    RulesConfig {
        options: RuleOptions::default(),
        rule,
        refinement: vec![RefinementConfig {
            trigger_class: "CrossSiteScripting".to_string(),
            keyword: "javascript".to_string(),
            added_class: "JavaScriptInjection".to_string(),
            predicate: Predicate::LeadsTo,
        }],
    }
}

/// Builtin taxonomy table
pub fn builtin_taxonomy() -> TaxonomyConfig {
    TaxonomyConfig {
        class: TAXONOMY
            .iter()
            .map(|(label, parent)| TaxonomyEntry {
                label: (*label).to_string(),
                parent: (*parent).to_string(),
            })
            .collect(),
    }
}

fn push_rules(
    out: &mut Vec<RuleConfig>,
    table: &[(&str, &str)],
    category: Category,
    source: &str,
    captures_version: bool,
    prefix: &str,
) {
    for (pattern, label) in table {
        out.push(RuleConfig {
            name: format!("{}_{}", prefix, label),
            category,
            pattern: (*pattern).to_string(),
            label: (*label).to_string(),
            tier: None,
            captures_version,
            source: source.to_string(),
        });
    }
}
