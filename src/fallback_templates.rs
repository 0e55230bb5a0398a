//! Static copy used when no LLM is reachable.

use crate::business_type::TemplateCategory;

pub struct SampleTestimonial {
    pub name: &'static str,
    pub role: &'static str,
    pub text: &'static str,
    pub rating: u8,
}

pub struct ContentTemplate {
    pub headlines: &'static [&'static str],
    pub subheadlines: &'static [&'static str],
    pub services: &'static [&'static str],
    pub features: &'static [&'static str],
    pub about: &'static str,
    pub testimonials: [SampleTestimonial; 3],
    pub stats: [(&'static str, &'static str); 4],
    pub cta: &'static str,
    pub tagline: &'static str,
    pub meta_description: &'static str,
}

const fn t(name: &'static str, role: &'static str, text: &'static str) -> SampleTestimonial {
    SampleTestimonial {
        name,
        role,
        text,
        rating: 5,
    }
}

pub static AGENCY: ContentTemplate = ContentTemplate {
    headlines: &[
        "Creative Solutions That Drive Results",
        "We Build Brands People Remember",
        "{name}: Strategy, Design and Growth",
    ],
    subheadlines: &[
        "{name} helps ambitious companies stand out with strategy, design and marketing that converts.",
        "From first sketch to final launch, we turn ideas into measurable growth.",
    ],
    services: &[
        "Brand Strategy",
        "Web Design & Development",
        "Digital Marketing",
        "Content Creation",
        "Social Media Management",
        "SEO Optimization",
    ],
    features: &[
        "Award-Winning Team",
        "Data-Driven Approach",
        "Transparent Reporting",
        "Dedicated Account Manager",
    ],
    about: "{name} is a full-service {businessType} that partners with brands to craft strategies, design experiences and deliver campaigns that move the needle. Every project is built around clear goals and measurable results.",
    testimonials: [
        t("Sarah Johnson", "Marketing Director", "Working with {name} transformed our online presence. Our leads doubled in three months."),
        t("Michael Chen", "Founder", "A genuinely creative team that listens. The new brand is exactly what we needed."),
        t("Emily Rodriguez", "Head of Growth", "Professional, fast and always one step ahead. Highly recommended."),
    ],
    stats: [("150+", "Projects Delivered"), ("98%", "Client Satisfaction"), ("10+", "Years Experience"), ("50+", "Brands Launched")],
    cta: "Start Your Project",
    tagline: "Ideas that grow your business",
    meta_description: "{name} is a {businessType} offering brand strategy, design and digital marketing that drives real results.",
};

pub static ECOMMERCE: ContentTemplate = ContentTemplate {
    headlines: &[
        "Shop Quality Products You'll Love",
        "Discover Something New Every Day",
        "{name}: Curated Goods, Delivered",
    ],
    subheadlines: &[
        "Browse the {name} collection and enjoy fast shipping, easy returns and friendly support.",
        "Hand-picked products at fair prices, delivered right to your door.",
    ],
    services: &[
        "Free Shipping Over $50",
        "Easy 30-Day Returns",
        "Secure Checkout",
        "Gift Wrapping",
        "Order Tracking",
        "Customer Support",
    ],
    features: &[
        "Carefully Curated Selection",
        "Fast Delivery",
        "Secure Payments",
        "Hassle-Free Returns",
    ],
    about: "{name} is an {businessType} built around quality and convenience. We source every product carefully and back each order with responsive support.",
    testimonials: [
        t("Jessica Lee", "Verified Buyer", "Great quality and it arrived two days early. I'll be ordering again."),
        t("David Kim", "Verified Buyer", "Easy checkout, great prices and the packaging was beautiful."),
        t("Amanda Torres", "Verified Buyer", "Customer service sorted my exchange in minutes. Love {name}!"),
    ],
    stats: [("10K+", "Happy Customers"), ("500+", "Products"), ("4.9", "Average Rating"), ("24h", "Dispatch Time")],
    cta: "Shop Now",
    tagline: "Quality you can count on",
    meta_description: "Shop {name} for curated products, fast shipping and easy returns.",
};

pub static RESTAURANT: ContentTemplate = ContentTemplate {
    headlines: &[
        "Delicious Food, Unforgettable Moments",
        "A Taste You'll Keep Coming Back For",
        "Welcome to {name}",
    ],
    subheadlines: &[
        "Fresh ingredients, warm hospitality and dishes made with love at {name}.",
        "Join us for a meal that brings people together.",
    ],
    services: &[
        "Dine-In",
        "Takeaway",
        "Catering",
        "Private Events",
        "Online Ordering",
        "Seasonal Menu",
    ],
    features: &[
        "Fresh Local Ingredients",
        "Cozy Atmosphere",
        "Friendly Staff",
        "Vegetarian Options",
    ],
    about: "{name} is a neighbourhood {businessType} serving dishes made from fresh, locally sourced ingredients. Whether it's a quick lunch or a special celebration, our table is always ready for you.",
    testimonials: [
        t("Maria Garcia", "Regular Guest", "The best meal I've had in ages. The staff made us feel right at home."),
        t("James Wilson", "Food Blogger", "{name} gets every detail right, from the bread to the dessert."),
        t("Linda Park", "Local Resident", "Our go-to spot for family dinners. Always fresh, always delicious."),
    ],
    stats: [("15+", "Years Serving"), ("50K+", "Meals Served"), ("4.8", "Guest Rating"), ("30+", "Signature Dishes")],
    cta: "Reserve a Table",
    tagline: "Good food, good company",
    meta_description: "{name} is a {businessType} serving fresh, locally sourced food. Book a table or order online.",
};

pub static FITNESS: ContentTemplate = ContentTemplate {
    headlines: &[
        "Transform Your Body, Transform Your Life",
        "Stronger Every Day",
        "Train Smarter at {name}",
    ],
    subheadlines: &[
        "Expert coaching, motivating classes and a community that keeps you going at {name}.",
        "Whatever your goal, we'll help you reach it.",
    ],
    services: &[
        "Personal Training",
        "Group Classes",
        "Nutrition Coaching",
        "Strength & Conditioning",
        "HIIT Sessions",
        "Online Programs",
    ],
    features: &[
        "Certified Trainers",
        "Modern Equipment",
        "Flexible Schedules",
        "Supportive Community",
    ],
    about: "{name} is a {businessType} dedicated to helping every member get stronger, fitter and more confident. Our certified coaches build programs around your goals.",
    testimonials: [
        t("Chris Martin", "Member", "Lost 15 kg and gained a ton of confidence. The coaches are amazing."),
        t("Rachel Adams", "Member", "The classes are tough but fun. I actually look forward to training now."),
        t("Tom Bradley", "Member", "Best investment in myself I've ever made. Thank you {name}!"),
    ],
    stats: [("500+", "Active Members"), ("20+", "Weekly Classes"), ("10", "Expert Coaches"), ("95%", "Goal Success Rate")],
    cta: "Start Your Free Trial",
    tagline: "Your strongest self starts here",
    meta_description: "{name} offers personal training, group classes and nutrition coaching. Start your free trial today.",
};

pub static HEALTHCARE: ContentTemplate = ContentTemplate {
    headlines: &[
        "Compassionate Care You Can Trust",
        "Your Health, Our Priority",
        "Caring for You at {name}",
    ],
    subheadlines: &[
        "{name} provides attentive, professional care for you and your family.",
        "Modern treatment with a personal touch.",
    ],
    services: &[
        "General Consultations",
        "Preventive Care",
        "Diagnostics",
        "Specialist Referrals",
        "Telehealth Appointments",
        "Health Screenings",
    ],
    features: &[
        "Experienced Practitioners",
        "Same-Week Appointments",
        "Modern Facilities",
        "Patient-First Approach",
    ],
    about: "{name} is a {businessType} focused on attentive, evidence-based care. Our team takes the time to listen and builds treatment plans around each patient.",
    testimonials: [
        t("Patricia Moore", "Patient", "The staff were kind and thorough. I felt genuinely cared for."),
        t("Robert Taylor", "Patient", "Easy to book, no long waits and excellent advice."),
        t("Susan Clark", "Patient", "{name} has looked after our whole family for years."),
    ],
    stats: [("20+", "Years of Care"), ("10K+", "Patients Served"), ("15", "Specialists"), ("4.9", "Patient Rating")],
    cta: "Book an Appointment",
    tagline: "Care that puts you first",
    meta_description: "{name} is a {businessType} offering consultations, preventive care and diagnostics. Book an appointment today.",
};

pub static BEAUTY: ContentTemplate = ContentTemplate {
    headlines: &[
        "Relax, Refresh and Reveal Your Glow",
        "Beauty Treatments Tailored to You",
        "Feel Your Best at {name}",
    ],
    subheadlines: &[
        "Indulge in expert treatments and a calming atmosphere at {name}.",
        "Pamper yourself with care from skilled professionals.",
    ],
    services: &[
        "Facials",
        "Massage Therapy",
        "Hair Styling",
        "Manicure & Pedicure",
        "Skin Care Consultations",
        "Bridal Packages",
    ],
    features: &[
        "Licensed Professionals",
        "Premium Products",
        "Relaxing Atmosphere",
        "Personalized Treatments",
    ],
    about: "{name} is a {businessType} where skilled professionals and premium products come together. Every visit is designed to help you relax and leave feeling your best.",
    testimonials: [
        t("Olivia Brown", "Client", "Pure bliss from start to finish. My skin has never looked better."),
        t("Sophia Davis", "Client", "The team is so talented and welcoming. I won't go anywhere else."),
        t("Grace Miller", "Client", "A little escape from the week. {name} is my happy place."),
    ],
    stats: [("5K+", "Happy Clients"), ("12", "Expert Stylists"), ("30+", "Treatments"), ("4.9", "Client Rating")],
    cta: "Book Your Treatment",
    tagline: "Where beauty meets relaxation",
    meta_description: "{name} is a {businessType} offering facials, massages and beauty treatments. Book your visit today.",
};

pub static SERVICE: ContentTemplate = ContentTemplate {
    headlines: &[
        "Reliable Service You Can Count On",
        "Professional Help When You Need It",
        "{name}: Done Right, On Time",
    ],
    subheadlines: &[
        "{name} delivers dependable, professional service with honest pricing.",
        "Experienced people, clear quotes and work that lasts.",
    ],
    services: &[
        "Free Consultations",
        "Custom Solutions",
        "Maintenance Plans",
        "Emergency Support",
        "Project Management",
        "After-Service Care",
    ],
    features: &[
        "Licensed & Insured",
        "Transparent Pricing",
        "Fast Response Times",
        "Satisfaction Guaranteed",
    ],
    about: "{name} is a trusted {businessType} known for dependable work and honest advice. We treat every job, big or small, with the same care and professionalism.",
    testimonials: [
        t("Mark Thompson", "Homeowner", "On time, on budget and the quality is excellent."),
        t("Karen White", "Business Owner", "{name} solved a problem three other companies couldn't."),
        t("Paul Harris", "Client", "Friendly, professional and clear about costs from day one."),
    ],
    stats: [("1,000+", "Jobs Completed"), ("15+", "Years in Business"), ("24/7", "Support"), ("100%", "Satisfaction Guarantee")],
    cta: "Get a Free Quote",
    tagline: "Service you can trust",
    meta_description: "{name} provides professional, reliable {businessType} with transparent pricing. Get a free quote.",
};

pub static PORTFOLIO: ContentTemplate = ContentTemplate {
    headlines: &[
        "Crafting Work That Speaks for Itself",
        "Design, Detail and Purpose",
        "Hi, This Is {name}",
    ],
    subheadlines: &[
        "A selection of projects by {name}, built with care and attention to detail.",
        "Explore recent work and let's create something great together.",
    ],
    services: &[
        "Visual Design",
        "Photography",
        "Illustration",
        "Art Direction",
        "Creative Consulting",
        "Commissions",
    ],
    features: &[
        "Distinctive Style",
        "Collaborative Process",
        "On-Time Delivery",
        "Attention to Detail",
    ],
    about: "{name} is a creative {businessType} focused on thoughtful, well-crafted work. Each project starts with listening and ends with something you'll be proud to share.",
    testimonials: [
        t("Natalie Young", "Creative Director", "{name} brings a rare eye for detail to every project."),
        t("Brian Scott", "Client", "Easy to work with and the results exceeded our brief."),
        t("Hannah King", "Editor", "A true professional with a distinctive style."),
    ],
    stats: [("200+", "Projects"), ("60+", "Happy Clients"), ("8", "Years Creating"), ("12", "Awards")],
    cta: "Let's Work Together",
    tagline: "Ideas, beautifully made",
    meta_description: "Explore the {businessType} of {name}: selected projects, services and ways to collaborate.",
};

pub static REAL_ESTATE: ContentTemplate = ContentTemplate {
    headlines: &[
        "Find the Place You'll Call Home",
        "Your Next Move Starts Here",
        "{name}: Local Experts in Property",
    ],
    subheadlines: &[
        "{name} helps buyers, sellers and renters move with confidence.",
        "Local knowledge, honest advice and a smooth process from start to finish.",
    ],
    services: &[
        "Home Buying",
        "Home Selling",
        "Property Valuation",
        "Rentals & Leasing",
        "Property Management",
        "Investment Advice",
    ],
    features: &[
        "Local Market Expertise",
        "Professional Photography",
        "Skilled Negotiators",
        "End-to-End Support",
    ],
    about: "{name} is a {businessType} agency with deep roots in the local market. We guide clients through every step of buying, selling and renting property.",
    testimonials: [
        t("Daniel Walker", "Home Buyer", "{name} found us the perfect home in just three weeks."),
        t("Laura Hall", "Seller", "Sold above asking price. The whole process was stress-free."),
        t("Kevin Allen", "Investor", "Honest advice and great market insight every time."),
    ],
    stats: [("500+", "Homes Sold"), ("$200M+", "In Sales"), ("20+", "Years Local"), ("98%", "Client Satisfaction")],
    cta: "Schedule a Viewing",
    tagline: "Helping you find home",
    meta_description: "{name} is a local {businessType} agency for buying, selling and renting property.",
};

pub static EDUCATION: ContentTemplate = ContentTemplate {
    headlines: &[
        "Learn Without Limits",
        "Education That Opens Doors",
        "Grow Your Skills at {name}",
    ],
    subheadlines: &[
        "{name} offers engaging courses taught by experienced educators.",
        "Practical learning for every stage of your journey.",
    ],
    services: &[
        "Private Tutoring",
        "Group Classes",
        "Online Courses",
        "Exam Preparation",
        "Workshops",
        "Certification Programs",
    ],
    features: &[
        "Experienced Instructors",
        "Flexible Learning",
        "Small Class Sizes",
        "Proven Results",
    ],
    about: "{name} is an {businessType} provider committed to practical, engaging learning. Our instructors combine expertise with genuine care for every student's progress.",
    testimonials: [
        t("Emma Wright", "Student", "The instructors made difficult topics easy to understand."),
        t("Lucas Green", "Parent", "My son's grades improved dramatically thanks to {name}."),
        t("Mia Baker", "Graduate", "Flexible, well-organized and genuinely useful courses."),
    ],
    stats: [("2,000+", "Students Taught"), ("50+", "Courses"), ("95%", "Pass Rate"), ("25", "Instructors")],
    cta: "Enroll Today",
    tagline: "Knowledge that moves you forward",
    meta_description: "{name} offers courses, tutoring and exam preparation with experienced instructors.",
};

pub static STARTUP: ContentTemplate = ContentTemplate {
    headlines: &[
        "The Smarter Way to Get Work Done",
        "Built for Teams That Move Fast",
        "Meet {name}",
    ],
    subheadlines: &[
        "{name} streamlines your workflow so you can focus on what matters.",
        "Powerful tools, simple setup and support that actually responds.",
    ],
    services: &[
        "Platform Access",
        "Onboarding & Setup",
        "Integrations",
        "Analytics Dashboard",
        "API Access",
        "Priority Support",
    ],
    features: &[
        "Lightning-Fast Setup",
        "Enterprise-Grade Security",
        "Seamless Integrations",
        "Real-Time Insights",
    ],
    about: "{name} is a {businessType} building tools that help teams work smarter. We obsess over simplicity so our customers can focus on growth.",
    testimonials: [
        t("Alex Turner", "CTO", "We were up and running in an afternoon. {name} just works."),
        t("Priya Patel", "Operations Lead", "Saved our team hours every week. The support is outstanding."),
        t("Jordan Lee", "Founder", "The product keeps getting better with every release."),
    ],
    stats: [("1,000+", "Teams"), ("99.9%", "Uptime"), ("50+", "Integrations"), ("4.8", "User Rating")],
    cta: "Get Started Free",
    tagline: "Work smarter, grow faster",
    meta_description: "{name} helps teams streamline their workflow with fast setup, integrations and real-time insights.",
};

pub static OTHER: ContentTemplate = ContentTemplate {
    headlines: &[
        "Welcome to {name}",
        "Quality You Can Count On",
        "Excellence in Everything We Do",
    ],
    subheadlines: &[
        "{name} is dedicated to providing outstanding service to every customer.",
        "Discover what makes us the trusted choice in our community.",
    ],
    services: &[
        "Consultations",
        "Custom Solutions",
        "Customer Support",
        "Professional Services",
    ],
    features: &[
        "Experienced Team",
        "Quality Guaranteed",
        "Customer Focused",
        "Competitive Pricing",
    ],
    about: "{name} is a {businessType} committed to quality, reliability and great customer service. We take pride in building lasting relationships with everyone we work with.",
    testimonials: [
        t("John Smith", "Customer", "Excellent service from start to finish. Highly recommended."),
        t("Jane Doe", "Customer", "{name} exceeded my expectations in every way."),
        t("Alex Morgan", "Customer", "Professional, friendly and reliable. I'll be back."),
    ],
    stats: [("1,000+", "Happy Customers"), ("10+", "Years Experience"), ("24/7", "Support"), ("100%", "Satisfaction")],
    cta: "Get Started",
    tagline: "Quality service, every time",
    meta_description: "{name} is a trusted {businessType} dedicated to quality and customer satisfaction.",
};

pub fn template_for(category: TemplateCategory) -> &'static ContentTemplate {
    match category {
        TemplateCategory::Agency => &AGENCY,
        TemplateCategory::Ecommerce => &ECOMMERCE,
        TemplateCategory::Restaurant => &RESTAURANT,
        TemplateCategory::Fitness => &FITNESS,
        TemplateCategory::Healthcare => &HEALTHCARE,
        TemplateCategory::Beauty => &BEAUTY,
        TemplateCategory::Service => &SERVICE,
        TemplateCategory::Portfolio => &PORTFOLIO,
        TemplateCategory::RealEstate => &REAL_ESTATE,
        TemplateCategory::Education => &EDUCATION,
        TemplateCategory::Startup => &STARTUP,
        TemplateCategory::Other => &OTHER,
    }
}

pub fn fill_placeholders(template: &str, name: &str, business_label: &str) -> String {
    template
        .replace("{name}", name)
        .replace("{businessType}", business_label)
}
