//! Skills gap: which dictionary skills a posting asks for, which of those the
//! résumé lacks, and certifications that cover the missing ones.
//!
//! Matching is whole-word and case-insensitive against a fixed dictionary. Nothing
//! outside the dictionary is ever reported.

use std::collections::HashSet;

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

/// Known skills, grouped for readability. A skill listed in several groups is matched once.
pub const SKILL_CATEGORIES: &[(&str, &[&str])] = &[
    (
        "programming_languages",
        &[
            "Python", "Java", "JavaScript", "C++", "C#", "Ruby", "Go", "Swift", "Kotlin", "PHP",
            "TypeScript", "Rust", "Scala", "Perl", "R", "MATLAB", "Shell", "SQL", "HTML", "CSS",
        ],
    ),
    (
        "frameworks_libraries",
        &[
            "React", "Angular", "Vue.js", "Django", "Flask", "Spring", "Express.js", "TensorFlow",
            "PyTorch", "Pandas", "NumPy", "scikit-learn", "Node.js", "jQuery", "Bootstrap",
            "Laravel", "ASP.NET", "Ruby on Rails", "Symfony", "FastAPI",
        ],
    ),
    (
        "databases",
        &[
            "MySQL", "PostgreSQL", "MongoDB", "SQLite", "Oracle", "SQL Server", "Redis",
            "Cassandra", "DynamoDB", "Firebase", "Elasticsearch", "MariaDB", "Neo4j", "CouchDB",
            "Firestore",
        ],
    ),
    (
        "cloud_platforms",
        &[
            "AWS", "Azure", "Google Cloud", "Heroku", "DigitalOcean", "IBM Cloud", "Oracle Cloud",
            "Alibaba Cloud", "Salesforce", "VMware", "OpenStack", "Kubernetes", "Docker",
        ],
    ),
    (
        "tools_platforms",
        &[
            "Git", "GitHub", "GitLab", "Bitbucket", "JIRA", "Confluence", "Jenkins", "Travis CI",
            "CircleCI", "Docker", "Kubernetes", "Terraform", "Ansible", "Puppet", "Chef",
            "Prometheus", "Grafana", "ELK Stack", "Nginx", "Apache",
        ],
    ),
    (
        "practices",
        &["Agile", "Machine Learning", "Data Science", "Cybersecurity"],
    ),
    (
        "soft_skills",
        &[
            "Communication", "Teamwork", "Problem-solving", "Critical thinking",
            "Time management", "Leadership", "Adaptability", "Creativity",
            "Emotional intelligence", "Conflict resolution", "Decision making",
            "Project management", "Attention to detail", "Customer service",
        ],
    ),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Certification {
    pub name: &'static str,
    pub provider: &'static str,
    pub url: &'static str,
}

const fn cert(name: &'static str, provider: &'static str, url: &'static str) -> Certification {
    Certification {
        name,
        provider,
        url,
    }
}

/// Certifications per skill. Lookup is case-insensitive.
pub const CERTIFICATIONS: &[(&str, &[Certification])] = &[
    (
        "Python",
        &[
            cert("Python Institute PCEP", "Python Institute", "https://pythoninstitute.org/certification/pcep-certification-entry-level/"),
            cert("Python Institute PCAP", "Python Institute", "https://pythoninstitute.org/certification/pcap-certification-associate/"),
            cert("Microsoft Certified: Azure Developer Associate", "Microsoft", "https://learn.microsoft.com/en-us/certifications/azure-developer/"),
        ],
    ),
    (
        "Java",
        &[
            cert("Oracle Certified Associate Java Programmer", "Oracle", "https://education.oracle.com/oracle-certified-associate-java-se-8-programmer/trackp_333"),
            cert("Oracle Certified Professional Java Programmer", "Oracle", "https://education.oracle.com/oracle-certified-professional-java-se-8-programmer/trackp_357"),
        ],
    ),
    (
        "JavaScript",
        &[
            cert("JavaScript Institute Certification", "W3Schools", "https://www.w3schools.com/cert/cert_javascript.asp"),
            cert("Certified JavaScript Developer", "DevSkiller", "https://devskiller.com/certifications/"),
        ],
    ),
    (
        "React",
        &[
            cert("Meta React Developer Professional Certificate", "Coursera", "https://www.coursera.org/professional-certificates/meta-front-end-developer"),
            cert("React.js Certification", "W3Schools", "https://www.w3schools.com/cert/cert_react.asp"),
        ],
    ),
    (
        "Angular",
        &[
            cert("Angular Certification", "Angular.io", "https://angular.io/guide/certification"),
            cert("Angular Developer Certification", "Udemy", "https://www.udemy.com/course/angular-certification/"),
        ],
    ),
    (
        "Django",
        &[
            cert("Django Developer Certification", "Udemy", "https://www.udemy.com/course/django-python-advanced/"),
            cert("Python Django Full Stack Developer Bootcamp", "Udemy", "https://www.udemy.com/course/python-and-django-full-stack-web-developer-bootcamp/"),
        ],
    ),
    (
        "MySQL",
        &[
            cert("Oracle MySQL Database Administration", "Oracle", "https://education.oracle.com/mysql-database-administration/pexam_1Z0-888"),
            cert("MySQL Developer Certification", "Oracle", "https://education.oracle.com/mysql-5-developer/pexam_1Z0-882"),
        ],
    ),
    (
        "MongoDB",
        &[
            cert("MongoDB Certified Developer Associate", "MongoDB", "https://university.mongodb.com/certification/developer/about"),
            cert("MongoDB Certified DBA Associate", "MongoDB", "https://university.mongodb.com/certification/dba/about"),
        ],
    ),
    (
        "AWS",
        &[
            cert("AWS Certified Cloud Practitioner", "Amazon", "https://aws.amazon.com/certification/certified-cloud-practitioner/"),
            cert("AWS Certified Solutions Architect - Associate", "Amazon", "https://aws.amazon.com/certification/certified-solutions-architect-associate/"),
            cert("AWS Certified Developer - Associate", "Amazon", "https://aws.amazon.com/certification/certified-developer-associate/"),
        ],
    ),
    (
        "Azure",
        &[
            cert("Microsoft Certified: Azure Fundamentals", "Microsoft", "https://learn.microsoft.com/en-us/certifications/azure-fundamentals/"),
            cert("Microsoft Certified: Azure Administrator Associate", "Microsoft", "https://learn.microsoft.com/en-us/certifications/azure-administrator/"),
        ],
    ),
    (
        "Google Cloud",
        &[
            cert("Google Cloud Digital Leader", "Google", "https://cloud.google.com/certification/cloud-digital-leader"),
            cert("Google Cloud Associate Engineer", "Google", "https://cloud.google.com/certification/cloud-engineer"),
        ],
    ),
    (
        "Docker",
        &[
            cert("Docker Certified Associate", "Docker", "https://training.mirantis.com/certification/dca-certification-exam/"),
            cert("Docker and Kubernetes: The Complete Guide", "Udemy", "https://www.udemy.com/course/docker-and-kubernetes-the-complete-guide/"),
        ],
    ),
    (
        "Kubernetes",
        &[
            cert("Certified Kubernetes Administrator (CKA)", "CNCF", "https://www.cncf.io/certification/cka/"),
            cert("Certified Kubernetes Application Developer (CKAD)", "CNCF", "https://www.cncf.io/certification/ckad/"),
        ],
    ),
    (
        "Machine Learning",
        &[
            cert("Machine Learning Specialization", "Coursera", "https://www.coursera.org/specializations/machine-learning-introduction"),
            cert("Professional Certificate in Machine Learning and Artificial Intelligence", "edX", "https://www.edx.org/professional-certificate/ibm-machine-learning"),
        ],
    ),
    (
        "Data Science",
        &[
            cert("IBM Data Science Professional Certificate", "Coursera", "https://www.coursera.org/professional-certificates/ibm-data-science"),
            cert("Microsoft Certified: Azure Data Scientist Associate", "Microsoft", "https://learn.microsoft.com/en-us/certifications/azure-data-scientist/"),
        ],
    ),
    (
        "TensorFlow",
        &[
            cert("TensorFlow Developer Certificate", "TensorFlow", "https://www.tensorflow.org/certificate"),
            cert("DeepLearning.AI TensorFlow Developer Professional Certificate", "Coursera", "https://www.coursera.org/professional-certificates/tensorflow-in-practice"),
        ],
    ),
    (
        "Project Management",
        &[
            cert("Project Management Professional (PMP)", "PMI", "https://www.pmi.org/certifications/project-management-pmp"),
            cert("Certified Associate in Project Management (CAPM)", "PMI", "https://www.pmi.org/certifications/certified-associate-capm"),
        ],
    ),
    (
        "Agile",
        &[
            cert("Professional Scrum Master I (PSM I)", "Scrum.org", "https://www.scrum.org/professional-scrum-certifications/professional-scrum-master-i-assessment"),
            cert("PMI Agile Certified Practitioner (PMI-ACP)", "PMI", "https://www.pmi.org/certifications/agile-acp"),
        ],
    ),
    (
        "Cybersecurity",
        &[
            cert("CompTIA Security+", "CompTIA", "https://www.comptia.org/certifications/security"),
            cert("Certified Information Systems Security Professional (CISSP)", "ISC2", "https://www.isc2.org/Certifications/CISSP"),
        ],
    ),
];

lazy_static! {
    /// One whole-word matcher per distinct skill, in dictionary order.
    ///
    /// A skill must not touch a letter, digit or `_` on either side, so `C++` and `C#`
    /// match before punctuation and `Go` does not match inside `Google`.
    static ref SKILL_PATTERNS: Vec<(&'static str, Regex)> = {
        let mut seen = HashSet::new();
        SKILL_CATEGORIES
            .iter()
            .flat_map(|(_, skills)| skills.iter().copied())
            .filter(|skill| seen.insert(skill.to_lowercase()))
            .filter_map(|skill| {
                let pattern = format!(r"(?i)(?:^|\W){}(?:\W|$)", regex::escape(skill));
                Regex::new(&pattern).ok().map(|re| (skill, re))
            })
            .collect()
    };
}

#[derive(Debug, Clone, Serialize)]
pub struct SkillCertifications {
    pub skill: String,
    pub certifications: &'static [Certification],
}

#[derive(Debug, Clone, Serialize)]
pub struct SkillsAnalysis {
    pub job_skills: Vec<String>,
    pub resume_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub certifications: Vec<SkillCertifications>,
}

/// Dictionary skills mentioned in `text`, in dictionary order, each once.
pub fn find_skills(text: &str) -> Vec<&'static str> {
    SKILL_PATTERNS
        .iter()
        .filter(|(_, re)| re.is_match(text))
        .map(|(skill, _)| *skill)
        .collect()
}

/// Job skills absent from `resume_skills`, compared case-insensitively. Keeps `job_skills` order.
pub fn missing_skills(resume_skills: &[String], job_skills: &[&str]) -> Vec<String> {
    let have: HashSet<String> = resume_skills
        .iter()
        .map(|s| s.trim().to_lowercase())
        .collect();

    job_skills
        .iter()
        .filter(|skill| !have.contains(&skill.to_lowercase()))
        .map(|skill| skill.to_string())
        .collect()
}

pub fn certifications_for(skill: &str) -> Option<&'static [Certification]> {
    CERTIFICATIONS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(skill))
        .map(|(_, certs)| *certs)
}

/// Full gap analysis against an explicit list of résumé skills.
pub fn analyze_skills(resume_skills: &[String], job_description: &str) -> SkillsAnalysis {
    let job_skills = find_skills(job_description);
    let missing = missing_skills(resume_skills, &job_skills);
    let certifications = missing
        .iter()
        .filter_map(|skill| {
            certifications_for(skill).map(|certifications| SkillCertifications {
                skill: skill.clone(),
                certifications,
            })
        })
        .collect();

    SkillsAnalysis {
        job_skills: job_skills.iter().map(|s| s.to_string()).collect(),
        resume_skills: resume_skills.to_vec(),
        missing_skills: missing,
        certifications,
    }
}

/// Gap analysis where the résumé's skills are the dictionary skills found in its text.
pub fn analyze_resume_text(resume_text: &str, job_description: &str) -> SkillsAnalysis {
    let resume_skills: Vec<String> = find_skills(resume_text)
        .into_iter()
        .map(str::to_string)
        .collect();
    analyze_skills(&resume_skills, job_description)
}
