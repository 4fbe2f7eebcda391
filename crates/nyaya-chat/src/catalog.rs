//! Canned response catalog.
//!
//! Maps each [`Category`] to a fixed multi-paragraph guidance template.
//! Templates are static: no randomness, no network or disk access. The
//! fallback template echoes the literal query in its opening line; no other
//! interpolation happens anywhere.

use crate::classifier::Category;

pub(crate) const PROPERTY_GUIDANCE: &str = r#"I can help you with property disputes. Based on Indian law, here are your options:

**Immediate Steps:**
1. Gather all property documents (sale deed, registry, etc.)
2. Check if the property is registered on Doris portal
3. Verify encumbrance certificate from Sub-Registrar

**Legal Remedies:**
- **Civil Suit**: File a declaratory suit in civil court
- **Revenue Court**: For agricultural land disputes
- **RERA**: For builder-related issues

**Timeline:** Civil suits typically take 3-5 years. Consider mediation for faster resolution.

Would you like me to help you draft a legal notice or find lawyers specializing in property law?"#;

pub(crate) const DIVORCE_GUIDANCE: &str = r#"I understand you need guidance on divorce proceedings. Here's what you should know:

**Types of Divorce in India:**
1. **Mutual Consent** (Section 13B, Hindu Marriage Act)
   - Both spouses agree
   - Minimum 1 year of separation
   - 6-18 months to complete

2. **Contested Divorce**
   - Grounds: Cruelty, adultery, desertion, mental disorder
   - Can take 3-5 years

**Key Considerations:**
- Child custody and visitation rights
- Alimony/maintenance calculations
- Division of jointly owned property

**Documents Needed:**
- Marriage certificate
- Address proof
- Income proof of both parties

Would you like information about free legal aid or family courts near you?"#;

pub(crate) const CONSUMER_GUIDANCE: &str = r#"I can help you file a consumer complaint. Here's what you need to know:

**Filing a Consumer Complaint:**

1. **National Consumer Helpline**: Call 1800-11-4000 (toll-free)
2. **Online Portal**: Visit consumerhelpline.gov.in

**Required Documents:**
- Purchase bill/invoice
- Warranty card (if applicable)
- Written complaint description
- Proof of defect (photos/videos)

**Jurisdiction:**
- Up to ₹1 Crore: District Forum
- ₹1-10 Crore: State Commission
- Above ₹10 Crore: National Commission

**Timeline:** Cases are typically resolved within 3-5 months.

Would you like me to help you draft a complaint letter?"#;

pub(crate) const TENANT_GUIDANCE: &str = r#"As a tenant in India, you have several important rights:

**Key Tenant Rights:**

1. **Written Agreement**: Always insist on a registered rental agreement
2. **Security Deposit**:
   - Maximum 2-3 months rent (varies by state)
   - Must be returned within 1 month of vacating
3. **Notice Period**: Typically 1-3 months as per agreement
4. **Essential Services**: Cannot be denied water, electricity

**Protection Against Illegal Eviction:**
- Landlord must give proper notice
- Cannot force eviction without court order
- Can approach Rent Controller for disputes

**Important Acts:**
- Rent Control Act (state-specific)
- Model Tenancy Act, 2021

Would you like information about rent control laws in your state?"#;

pub(crate) const FALLBACK_GUIDANCE: &str = r#"Based on Indian law, I can provide guidance on this matter. Here are some key points:

**General Legal Framework:**
1. Review applicable laws and regulations
2. Document all relevant information
3. Consider alternative dispute resolution
4. Consult with a qualified advocate if needed

**Recommended Steps:**
- Gather all relevant documents
- Understand your legal rights
- Explore mediation options
- Prepare for potential litigation

**Free Legal Aid:**
If you cannot afford a lawyer, you may be eligible for free legal aid under the Legal Services Authority Act, 1987. Contact your district legal services authority.

Would you like me to provide more specific information on any of these points?"#;

/// Fixed category-to-template mapping.
#[derive(Debug, Default, Clone, Copy)]
pub struct ResponseCatalog;

impl ResponseCatalog {
    /// Create a new catalog.
    pub fn new() -> Self {
        Self
    }

    /// Render the template for a category.
    ///
    /// The four keyword categories return their template verbatim; the
    /// fallback prepends an opening line echoing the literal query.
    pub fn render(&self, category: Category, query: &str) -> String {
        match category {
            Category::Property => PROPERTY_GUIDANCE.to_string(),
            Category::Divorce => DIVORCE_GUIDANCE.to_string(),
            Category::Consumer => CONSUMER_GUIDANCE.to_string(),
            Category::Tenant => TENANT_GUIDANCE.to_string(),
            Category::GeneralFallback => {
                format!(
                    "Thank you for your question about \"{}\".\n\n{}",
                    query, FALLBACK_GUIDANCE
                )
            }
        }
    }
}
