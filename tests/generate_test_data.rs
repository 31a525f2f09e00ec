/// Test data generator for Compass Fit
///
/// Generates CSV files containing test products and contacts
/// that can be imported via Appwrite Console.
///
/// Run: cargo run --bin generate-test-data

use std::fs::File;
use std::io::{BufWriter, Write};

const FIRST_NAMES: &[&str] = &[
    "Alex", "Jordan", "Taylor", "Morgan", "Casey", "Riley", "Quinn", "Avery",
    "Blake", "Carter", "Dakota", "Emerson", "Finley", "Harper", "Hayden", "Jules",
    "Kai", "Lane", "Marlowe", "Noel", "Parker", "Reese", "Rowan", "Sage", "Skyler",
];

const LAST_NAMES: &[&str] = &[
    "Adler", "Bennett", "Calloway", "Drummond", "Eastman", "Fischer", "Grantham",
    "Holloway", "Iverson", "Jennings", "Keller", "Lindqvist", "Moreau", "Navarro",
    "Okafor", "Petrov", "Quintana", "Reyes", "Sandoval", "Tanaka", "Vargas", "Whitfield",
];

const INDUSTRIES: &[&str] = &[
    "SaaS", "Fintech", "Healthcare", "Manufacturing", "Retail", "Education",
    "Logistics", "Real Estate", "Media", "Cybersecurity",
];

const COMPANY_SIZES: &[&str] = &["1-10", "11-50", "51-200", "201-500", "501-1000", "1000+"];

const TITLES: &[&str] = &[
    "CEO", "CTO", "CFO", "VP of Sales", "VP of Engineering", "Head of Marketing",
    "Director of Operations", "Sales Manager", "Account Executive", "Product Manager",
    "IT Administrator", "Customer Success Lead",
];

const DEPARTMENTS: &[&str] = &[
    "Sales", "Marketing", "Engineering", "Operations", "Finance", "IT",
];

const STATUSES: &[&str] = &[
    "new", "contacted", "qualified", "hot", "warm", "proposal",
    "meeting scheduled", "closed-won", "closed-lost",
];

const TAGS: &[&str] = &[
    "forecasting", "dashboards", "automation", "compliance", "integrations",
    "analytics", "onboarding", "reporting", "security", "budget-holder",
    "decision-maker", "churn-risk", "expansion",
];

/// (id, name, category, industries, sizes, titles, departments, features, pains, uses)
const PRODUCTS: &[(
    &str,
    &str,
    &str,
    &[&str],
    &[&str],
    &[&str],
    &[&str],
    &[&str],
    &[&str],
    &[&str],
)] = &[
    (
        "prod_analytics",
        "Compass Analytics",
        "analytics",
        &["SaaS", "Fintech"],
        &["smb", "mid-market"],
        &["VP", "Director", "Head"],
        &["Sales", "Marketing"],
        &["dashboards", "forecasting", "alerts"],
        &["manual reporting", "pipeline blind spots"],
        &["quarterly forecast reviews", "pipeline reviews"],
    ),
    (
        "prod_outreach",
        "Compass Outreach",
        "sales engagement",
        &["SaaS", "Media", "Education"],
        &["startup", "smb"],
        &["Sales Manager", "Account Executive", "VP of Sales"],
        &["Sales"],
        &["sequencing", "templates", "automation"],
        &["low reply rates", "manual follow-up"],
        &["outbound campaigns"],
    ),
    (
        "prod_billing",
        "Compass Billing",
        "billing",
        &["SaaS", "Fintech", "Retail"],
        &["mid-market", "enterprise"],
        &["CFO", "Director of Finance"],
        &["Finance", "Operations"],
        &["invoicing", "dunning", "revenue recognition"],
        &["billing errors", "revenue leakage"],
        &["subscription billing"],
    ),
    (
        "prod_support",
        "Compass Support",
        "customer support",
        &[],
        &[],
        &["Customer Success Lead", "Head of Support"],
        &["Operations"],
        &["ticketing", "knowledge base", "reporting"],
        &["slow response times"],
        &["shared inbox consolidation"],
    ),
    (
        "prod_security",
        "Compass Shield",
        "security",
        &["Cybersecurity", "Fintech", "Healthcare"],
        &["enterprise"],
        &["CTO", "CISO", "IT Administrator"],
        &["IT", "Engineering"],
        &["audit trails", "sso", "compliance reports"],
        &["audit overhead", "access sprawl"],
        &["soc2 preparation"],
    ),
];

struct ContactRow {
    document_id: String,
    contact_id: String,
    name: String,
    industry: String,
    company_size: String,
    title: String,
    department: String,
    tags: String,
    status: String,
    created_at: String,
}

// Simple random number generator using system time
fn get_seed() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_nanos() as u64
}

fn rand_int(max: usize) -> usize {
    (get_seed() % max as u64) as usize
}

fn rand_choice<'a>(options: &'a [&'a str]) -> &'a str {
    options[rand_int(options.len())]
}

fn rand_choices(options: &[&str], count: usize) -> Vec<String> {
    let mut result = Vec::new();
    let mut used = std::collections::HashSet::new();
    let mut attempts = 0;
    while result.len() < count.min(options.len()) && attempts < 100 {
        let idx = rand_int(options.len());
        if used.insert(idx) {
            result.push(options[idx].to_string());
        }
        attempts += 1;
    }
    result
}

fn json_array(items: &[String]) -> String {
    if items.is_empty() {
        "[]".to_string()
    } else {
        format!("[\"{}\"]", items.join("\",\""))
    }
}

fn json_array_str(items: &[&str]) -> String {
    let owned: Vec<String> = items.iter().map(|s| s.to_string()).collect();
    json_array(&owned)
}

fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace("\"", "\"\""))
    } else {
        s.to_string()
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let num_contacts = 500;

    println!("Generating {} test contacts...", num_contacts);

    let mut contacts = Vec::new();

    for contact_num in 0..num_contacts {
        std::thread::sleep(std::time::Duration::from_millis(1)); // Seed variation

        let contact_id = format!("test_contact_{:04}", contact_num);
        let name = format!("{} {}", rand_choice(FIRST_NAMES), rand_choice(LAST_NAMES));

        // Leave some fields blank so partial-data scoring paths see real traffic
        let industry = if rand_int(5) == 0 { "" } else { rand_choice(INDUSTRIES) };
        let company_size = if rand_int(6) == 0 { "" } else { rand_choice(COMPANY_SIZES) };
        let title = if rand_int(4) == 0 { "" } else { rand_choice(TITLES) };
        let department = if rand_int(3) == 0 { "" } else { rand_choice(DEPARTMENTS) };
        let status = if rand_int(8) == 0 { "" } else { rand_choice(STATUSES) };

        let tags = rand_choices(TAGS, rand_int(5));

        let row = ContactRow {
            document_id: uuid::Uuid::new_v4().to_string(),
            contact_id,
            name,
            industry: industry.to_string(),
            company_size: company_size.to_string(),
            title: title.to_string(),
            department: department.to_string(),
            tags: json_array(&tags),
            status: status.to_string(),
            created_at: chrono::Utc::now().to_rfc3339(),
        };
        contacts.push(row);
    }

    // Write contacts CSV
    let mut contacts_csv = BufWriter::new(File::create("test_contacts.csv")?);
    writeln!(
        contacts_csv,
        "$id,contactId,name,industry,companySize,title,department,tags,status,createdAt"
    )?;
    for c in &contacts {
        writeln!(
            contacts_csv,
            "{},{},{},{},{},{},{},{},{},{}",
            escape_csv(&c.document_id),
            escape_csv(&c.contact_id),
            escape_csv(&c.name),
            escape_csv(&c.industry),
            escape_csv(&c.company_size),
            escape_csv(&c.title),
            escape_csv(&c.department),
            escape_csv(&c.tags),
            escape_csv(&c.status),
            escape_csv(&c.created_at),
        )?;
    }
    println!("Created test_contacts.csv with {} contacts", contacts.len());

    // Write products CSV
    let mut products_csv = BufWriter::new(File::create("test_products.csv")?);
    writeln!(
        products_csv,
        "$id,productId,name,category,targetIndustries,targetCompanySizes,targetTitles,targetDepartments,features,painPointsAddressed,useCases,competitiveAdvantages,valuePropositions,pricingModel"
    )?;
    for (id, name, category, industries, sizes, titles, departments, features, pains, uses) in
        PRODUCTS
    {
        writeln!(
            products_csv,
            "{},{},{},{},{},{},{},{},{},{},{},{},{},{}",
            escape_csv(&uuid::Uuid::new_v4().to_string()),
            escape_csv(id),
            escape_csv(name),
            escape_csv(category),
            escape_csv(&json_array_str(industries)),
            escape_csv(&json_array_str(sizes)),
            escape_csv(&json_array_str(titles)),
            escape_csv(&json_array_str(departments)),
            escape_csv(&json_array_str(features)),
            escape_csv(&json_array_str(pains)),
            escape_csv(&json_array_str(uses)),
            escape_csv("[]"),
            escape_csv("[]"),
            escape_csv("subscription"),
        )?;
    }
    println!("Created test_products.csv with {} products", PRODUCTS.len());

    println!();
    println!("To delete all test contacts, use this query in Appwrite:");
    println!("  query = startsWith(\"contactId\", \"test_contact_\")");
    println!();

    Ok(())
}
